//! Tracing setup: an `EnvFilter`ed stderr layer, plus an optional plain-text or
//! JSON session log file.

use chrono::Local;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use teamup_config::LoggingConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. `RUST_LOG` wins over the configured level;
/// `--verbose` raises the default to `debug`.
///
/// With `session_file` set and file logging enabled, also writes to
/// `<log_dir>/application_<yyyyMMdd_HHmmss>.log` and returns that path.
pub fn init(verbose: bool, config: &LoggingConfig, session_file: bool) -> Option<PathBuf> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut text_layer = None;
    let mut json_layer = None;
    let mut path = None;
    if session_file && config.file_logging {
        match open_session_log(&config.log_dir) {
            Ok((file, opened)) => {
                if config.json {
                    json_layer = Some(fmt::layer().json().with_writer(Mutex::new(file)));
                } else {
                    text_layer = Some(
                        fmt::layer()
                            .with_ansi(false)
                            .with_target(false)
                            .with_writer(Mutex::new(file)),
                    );
                }
                path = Some(opened);
            }
            Err(e) => {
                eprintln!("Failed to open session log in {}: {e}", config.log_dir.display());
            }
        }
    }

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(text_layer)
        .with(json_layer)
        .try_init();

    path
}

fn open_session_log(dir: &Path) -> std::io::Result<(File, PathBuf)> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(session_log_name(Local::now()));
    let file = File::create(&path)?;
    Ok((file, path))
}

fn session_log_name<Tz: chrono::TimeZone>(now: chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("application_{}.log", now.format("%Y%m%d_%H%M%S"))
}
