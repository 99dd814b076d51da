pub mod baseline;
pub mod defs;
