//! TeamUp CLI — the main entry point.
//!
//! Commands:
//! - `onboard`       — Write the default config and data directory
//! - `menu`          — Interactive session (default)
//! - `survey`        — Survey one participant into the roster file
//! - `participants`  — List participants
//! - `form`          — Form teams with one strategy
//! - `compare`       — Run every strategy side by side
//! - `config`        — Show, locate or validate the configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use teamup_config::{AppConfig, LoggingConfig};
use teamup_formation::StrategyKind;

mod commands;
mod logging;
mod prompt;

#[derive(Parser)]
#[command(
    name = "teamup",
    about = "TeamUp — survey participants and form balanced teams",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.teamup/config.toml
    #[arg(long, global = true, env = "TEAMUP_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration and create the data directory
    Onboard,

    /// Start the interactive menu session
    Menu,

    /// Survey one participant and add them to the roster file
    Survey,

    /// List participants
    Participants {
        /// Read participants from this CSV instead of the roster file
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Form teams with one strategy
    Form {
        /// balanced, skill-based or role-based
        #[arg(short, long)]
        strategy: Option<StrategyKind>,

        /// Members per team
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Read participants from this CSV instead of the roster file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Export the formed teams to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print teams and statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run all strategies concurrently and compare their statistics
    Compare {
        /// Members per team
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Read participants from this CSV instead of the roster file
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Check the configuration for errors
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let command = cli.command.unwrap_or(Commands::Menu);

    // `config validate` reports load errors itself
    if let Commands::Config {
        action: ConfigAction::Validate,
    } = command
    {
        logging::init(cli.verbose, &LoggingConfig::default(), false);
        return commands::config_cmd::validate(&config_path).await;
    }

    let config = AppConfig::load_with_env(&config_path)
        .map_err(|e| format!("Failed to load config: {e}"))?;

    let interactive = matches!(command, Commands::Menu | Commands::Survey);
    if let Some(log_file) = logging::init(cli.verbose, &config.logging, interactive) {
        tracing::debug!(path = %log_file.display(), "Writing session log");
    }

    match command {
        Commands::Onboard => commands::onboard::run(&config, &config_path).await?,
        Commands::Menu => commands::menu::run(&config).await?,
        Commands::Survey => commands::survey::run(&config).await?,
        Commands::Participants { input } => {
            commands::participants::run(&config, input.as_deref()).await?
        }
        Commands::Form {
            strategy,
            size,
            input,
            output,
            json,
        } => {
            let args = commands::form::FormArgs {
                strategy,
                size,
                input,
                output,
                json,
            };
            commands::form::run(&config, args).await?
        }
        Commands::Compare { size, input } => {
            commands::compare::run(&config, size, input.as_deref()).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(&config).await?,
            ConfigAction::Path => commands::config_cmd::path(&config_path).await?,
            ConfigAction::Validate => {} // handled above
        },
    }

    Ok(())
}
