use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use topic_ranker::{
    FetchConfig, GoogleNewsRetriever, HeadlineSummarizer, PanelService, Preferences, SearchRequest,
};
use tracing::info;

/// Rank news for one or more topics and print a digest per topic.
#[derive(Debug, Parser)]
#[command(name = "topic-ranker", version)]
struct Cli {
    /// Topics, separated by commas or "and"
    query: String,

    /// Ranking profile: default, technology, finance, ai, sports or world
    #[arg(long)]
    profile: Option<String>,

    /// JSON preferences file
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Print the full response as JSON
    #[arg(long)]
    json: bool,
}

fn load_preferences(path: &PathBuf) -> anyhow::Result<Preferences> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Reading preferences from {}", path.display()))?;
    let preferences = serde_json::from_str(&raw)
        .with_context(|| format!("Decoding preferences in {}", path.display()))?;
    Ok(preferences)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let preferences = cli.prefs.as_ref().map(load_preferences).transpose()?;

    info!("Starting topic ranker for '{}'", cli.query);

    let retriever = GoogleNewsRetriever::new(FetchConfig::default())?;
    let service = PanelService::new(Arc::new(retriever), Arc::new(HeadlineSummarizer));

    let request = SearchRequest {
        query: cli.query,
        profile: cli.profile,
        preferences,
    };
    let response = service.search(&request).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    for panel in &response.panels {
        let fallback = if panel.meta.profile_fallback { ", fallback" } else { "" };
        println!("## {} [{}{}]", panel.title, panel.meta.profile, fallback);
        println!("{}\n", panel.digest.summary_md);
        for (i, item) in panel.items.iter().enumerate() {
            println!(
                "{}. {} ({}) {}",
                i + 1,
                item.item.title,
                item.item.source.as_deref().unwrap_or("unknown source"),
                item.time_ago
            );
            println!("   {}", item.item.url);
        }
        println!();
    }

    Ok(())
}
