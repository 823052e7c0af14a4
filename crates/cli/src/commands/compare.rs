//! `teamup compare` — Run every strategy over the same pool.

use super::{load, report};
use std::path::Path;
use std::sync::Arc;
use teamup_config::AppConfig;
use teamup_core::TracingSink;
use teamup_formation::FormationService;

pub async fn run(
    config: &AppConfig,
    size: Option<usize>,
    input: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let team_size = size.unwrap_or(config.formation.default_team_size);
    let (roster, summary) = load::load_roster(config, input, Arc::new(TracingSink))?;
    println!("{}\n", load::describe(&summary));

    let service = FormationService::new(Arc::new(TracingSink));
    let reports = service.compare(roster.persons(), team_size).await;
    service.shutdown(config.formation.shutdown_grace()).await;
    let reports = reports?;

    println!(
        "Strategy comparison: {} participants, teams of {team_size}\n",
        roster.len()
    );
    print!("{}", report::comparison(&reports));
    Ok(())
}
