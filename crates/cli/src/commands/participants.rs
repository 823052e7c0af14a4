//! `teamup participants` — List the participant pool.

use super::{load, report};
use std::path::Path;
use std::sync::Arc;
use teamup_config::AppConfig;
use teamup_core::TracingSink;

pub async fn run(config: &AppConfig, input: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (roster, summary) = load::load_roster(config, input, Arc::new(TracingSink))?;
    println!("{}\n", load::describe(&summary));
    print!("{}", report::participants(roster.persons()));
    Ok(())
}
