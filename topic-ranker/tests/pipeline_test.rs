mod common;

use common::{fixed_now, init_tracing, item, item_aged, titles};
use topic_ranker::profile::ProfileName;
use topic_ranker::{rank_topics, FocusDecision, Preferences, TopicPipeline};

fn finance_scenario() -> Vec<topic_ranker::Item> {
    vec![
        item_aged("Fed raises rates", "https://fed.com/a", 0),
        item_aged("Fed raises rates again", "https://www.reuters.com/b", 1),
        item_aged("Unrelated sports story", "https://espn.com/c", 0),
    ]
}

#[test]
fn test_finance_scenario_soft_boost() {
    init_tracing();

    let pipeline = TopicPipeline::new(ProfileName::Finance, None);
    let ranking = pipeline.run_at(&finance_scenario(), "fed rates", fixed_now());

    assert_eq!(ranking.hard_hits, 2);
    assert_eq!(ranking.focus_decision, FocusDecision::SoftBoosted);
    assert!(ranking.profile_fallback);
    assert_eq!(ranking.effective_window_hours, 36);
    assert_eq!(
        titles(&ranking.ranked_items),
        vec!["Fed raises rates again", "Fed raises rates", "Unrelated sports story"]
    );

    // text 2.0 + recency 0.4*e^(-1/36) + prior 0.35 + keyword and domain bonus 0.6
    let reuters = &ranking.ranked_items[0];
    let expected = 2.0 + 0.4 * (-1.0f64 / 36.0).exp() + 0.35 + 0.6;
    assert!((reuters.score - expected).abs() < 1e-6, "score {}", reuters.score);
    assert!((reuters.focus_bonus - 0.6).abs() < 1e-9);

    let sports = &ranking.ranked_items[2];
    assert!((sports.score - 0.4).abs() < 1e-6);
    assert_eq!(sports.focus_bonus, 0.0);
}

#[test]
fn test_three_hard_hits_use_hard_filter() {
    let mut items = finance_scenario();
    items.push(item_aged("Stocks slide on earnings", "https://cnbc.com/d", 2));

    let pipeline = TopicPipeline::new(ProfileName::Finance, None);
    let ranking = pipeline.run_at(&items, "fed rates", fixed_now());

    assert_eq!(ranking.hard_hits, 3);
    assert_eq!(ranking.focus_decision, FocusDecision::HardFiltered);
    assert!(!ranking.profile_fallback);
    assert_eq!(ranking.ranked_items.len(), 3);
    assert!(ranking
        .ranked_items
        .iter()
        .all(|s| s.item.title != "Unrelated sports story" && s.focus_bonus == 0.0));
}

#[test]
fn test_no_hard_hits_on_focused_profile_soft_boosts() {
    let items = vec![
        item("Cat rescued from tree", "https://example.com/a"),
        item("Local bakery opens", "https://example.org/b"),
    ];
    let ranking = TopicPipeline::new(ProfileName::Finance, None).run_at(&items, "cat", fixed_now());

    assert_eq!(ranking.hard_hits, 0);
    assert_eq!(ranking.focus_decision, FocusDecision::SoftBoosted);
    assert!(ranking.profile_fallback);
    assert_eq!(ranking.ranked_items.len(), 2);
}

#[test]
fn test_focus_decision_table() {
    let cases = [
        (0, 0, ProfileName::Finance, FocusDecision::Unfiltered),
        (0, 0, ProfileName::Default, FocusDecision::Unfiltered),
        (5, 0, ProfileName::Default, FocusDecision::Unfiltered),
        (5, 0, ProfileName::Finance, FocusDecision::SoftBoosted),
        (5, 1, ProfileName::Sports, FocusDecision::SoftBoosted),
        (5, 2, ProfileName::Default, FocusDecision::SoftBoosted),
        (5, 3, ProfileName::Finance, FocusDecision::HardFiltered),
        (9, 9, ProfileName::Default, FocusDecision::HardFiltered),
    ];

    for (pool, hits, profile, expected) in cases {
        let decision = FocusDecision::decide(pool, hits, profile);
        assert_eq!(decision, expected, "pool={} hits={} profile={}", pool, hits, profile);
        assert_eq!(decision.is_fallback(), expected == FocusDecision::SoftBoosted);
    }
}

#[test]
fn test_default_profile_is_neutral() {
    let items: Vec<_> = (0..6)
        .map(|i| item(&format!("Garden tips part {}", i), &format!("https://site{}.com/x", i)))
        .collect();
    let ranking = TopicPipeline::new(ProfileName::Default, None).run_at(&items, "garden", fixed_now());

    assert!(!ranking.profile_fallback);
    assert_eq!(ranking.ranked_items.len(), 6);
    assert!(ranking.ranked_items.iter().all(|s| s.focus_bonus == 0.0));
    // Equal scores keep retrieval order.
    let expected: Vec<String> = items.iter().map(|i| i.title.clone()).collect();
    assert_eq!(titles(&ranking.ranked_items), expected);
}

#[test]
fn test_empty_input() {
    for name in ProfileName::ALL {
        let ranking = TopicPipeline::new(name, None).run_at(&[], "anything", fixed_now());
        assert!(ranking.ranked_items.is_empty());
        assert!(!ranking.profile_fallback);
        assert_eq!(ranking.focus_decision, FocusDecision::Unfiltered);
    }
}

#[test]
fn test_unknown_profile_behaves_as_default() {
    let items = finance_scenario();
    let unknown = TopicPipeline::new(ProfileName::from_name("crypto"), None);
    let default = TopicPipeline::new(ProfileName::Default, None);

    assert_eq!(unknown.profile_name(), ProfileName::Default);
    assert!(unknown.focus().is_empty());
    assert_eq!(
        unknown.run_at(&items, "fed", fixed_now()),
        default.run_at(&items, "fed", fixed_now())
    );
}

#[test]
fn test_output_is_capped_and_sorted() {
    let items: Vec<_> = (0..30)
        .map(|i| {
            let title = format!("Headline {} about {}", i, if i % 3 == 0 { "rates" } else { "weather" });
            item_aged(&title, &format!("https://outlet{}.com/story", i), i % 10)
        })
        .collect();

    let ranking = TopicPipeline::new(ProfileName::Default, None)
        .with_max_links(50)
        .run_at(&items, "rates", fixed_now());

    assert_eq!(ranking.ranked_items.len(), 20);
    assert!(ranking
        .ranked_items
        .windows(2)
        .all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_preference_overrides_flow_through() {
    let items = vec![
        item_aged("Fed holds rates", "https://www.reuters.com/1", 1),
        item_aged("Fed minutes released", "https://reuters.com/2", 2),
        item_aged("Fed chair speaks", "https://reuters.com/3", 3),
    ];

    let base = TopicPipeline::new(ProfileName::Finance, None).run_at(&items, "fed", fixed_now());
    assert_eq!(base.ranked_items.len(), 1);
    assert_eq!(base.effective_window_hours, 36);

    let mut preferences = Preferences::default();
    preferences.ranking.per_domain_cap = Some(2.0);
    preferences.search.time_window_hours = Some(24.0);

    let pipeline = TopicPipeline::new(ProfileName::Finance, Some(&preferences));
    let ranking = pipeline.run_at(&items, "fed", fixed_now());
    assert_eq!(ranking.ranked_items.len(), 2);
    assert_eq!(ranking.effective_window_hours, 24);
    assert_eq!(pipeline.profile().window_hours, Some(24));
}

#[test]
fn test_prefilter_window_applies_inside_pipeline() {
    // Six fresh items plus one older than the finance window.
    let mut items: Vec<_> = (0..6)
        .map(|i| item_aged(&format!("Markets update {}", i), &format!("https://m{}.com", i), i))
        .collect();
    items.push(item_aged("Markets weekly wrap", "https://old.com/wrap", 40));

    let ranking = TopicPipeline::new(ProfileName::Finance, None).run_at(&items, "markets", fixed_now());
    assert_eq!(ranking.ranked_items.len(), 6);
    assert!(ranking.ranked_items.iter().all(|s| s.item.title != "Markets weekly wrap"));
}

#[tokio::test]
async fn test_rank_topics_keeps_topic_order() {
    init_tracing();

    let pipeline = TopicPipeline::new(ProfileName::Finance, None);
    let topics = vec![
        ("fed rates".to_string(), finance_scenario()),
        ("empty".to_string(), vec![]),
        ("stocks".to_string(), vec![item("Stocks slide", "https://ft.com/x")]),
    ];

    let rankings = rank_topics(&pipeline, topics).await.unwrap();

    let names: Vec<&str> = rankings.iter().map(|r| r.topic.as_str()).collect();
    assert_eq!(names, vec!["fed rates", "empty", "stocks"]);
    assert_eq!(rankings[0].ranked_items.len(), 3);
    assert!(rankings[1].ranked_items.is_empty());
    assert!(rankings[2].profile_fallback);
}

#[tokio::test]
async fn test_run_blocking_matches_inline_run() {
    let pipeline = TopicPipeline::new(ProfileName::Finance, None);

    let inline = pipeline.run_at(&finance_scenario(), "fed rates", fixed_now());
    let pooled = pipeline
        .run_blocking(finance_scenario(), "fed rates".to_string(), fixed_now())
        .await
        .unwrap();

    assert_eq!(pooled, inline);
}
