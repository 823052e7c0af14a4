//! `teamup form` — Form teams with one strategy.

use super::{load, report};
use std::path::PathBuf;
use std::sync::Arc;
use teamup_config::AppConfig;
use teamup_core::TracingSink;
use teamup_formation::{aggregate, unassigned, FormationService, StrategyKind};
use teamup_roster::{export_teams, validate};

pub struct FormArgs {
    pub strategy: Option<StrategyKind>,
    pub size: Option<usize>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json: bool,
}

pub async fn run(config: &AppConfig, args: FormArgs) -> Result<(), Box<dyn std::error::Error>> {
    let strategy = match args.strategy {
        Some(kind) => kind,
        None => config.formation.strategy()?,
    };
    let team_size = args.size.unwrap_or(config.formation.default_team_size);
    if let Some(output) = &args.output {
        validate::csv_path(&output.to_string_lossy())?;
    }

    let (roster, summary) = load::load_roster(config, args.input.as_deref(), Arc::new(TracingSink))?;
    if !args.json {
        println!("{}\n", load::describe(&summary));
    }

    let mut service = FormationService::new(Arc::new(TracingSink));
    let formed = service.form(strategy, roster.persons(), team_size);
    service.shutdown(config.formation.shutdown_grace()).await;
    let teams = formed?;

    let statistics = aggregate(&teams);
    let left_out = unassigned(roster.persons(), &teams);

    if let Some(output) = &args.output {
        export_teams(output, &teams)?;
    }

    if args.json {
        let body = serde_json::json!({
            "strategy": strategy,
            "team_size": team_size,
            "teams": teams,
            "statistics": statistics,
            "unassigned": left_out,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Formed {} teams of {team_size} ({strategy})\n", teams.len());
    print!("{}", report::teams(&teams));
    println!();
    print!("{}", report::statistics(&statistics));
    let left_out = report::unassigned(&left_out);
    if !left_out.is_empty() {
        println!();
        print!("{left_out}");
    }
    if let Some(output) = &args.output {
        println!("\n✅ Teams exported to {}", output.display());
    }
    Ok(())
}
