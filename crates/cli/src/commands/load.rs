//! Roster loading shared by the one-shot commands and the menu session.

use std::path::Path;
use std::sync::Arc;
use teamup_config::AppConfig;
use teamup_core::{EventSink, RosterError};
use teamup_roster::{validate, LoadSummary, Roster};

/// Load participants from `input`, or from the configured roster file with
/// the sample file as fallback.
pub fn load_roster(
    config: &AppConfig,
    input: Option<&Path>,
    sink: Arc<dyn EventSink>,
) -> Result<(Roster, LoadSummary), RosterError> {
    let mut roster = Roster::with_sink(sink);
    let summary = match input {
        Some(path) => {
            validate::csv_path(&path.to_string_lossy())?;
            roster.load_csv(path)?
        }
        None => roster.auto_load(&config.data.roster_file, &config.data.sample_file)?,
    };
    Ok((roster, summary))
}

/// One-paragraph description of a load, with skipped rows listed.
pub fn describe(summary: &LoadSummary) -> String {
    let mut text = format!(
        "Loaded {} participants from {}",
        summary.added,
        summary.source.display()
    );
    if summary.duplicates > 0 {
        text.push_str(&format!(" ({} duplicate emails ignored)", summary.duplicates));
    }
    if !summary.skipped.is_empty() {
        text.push_str(&format!("\nSkipped {} invalid rows:", summary.skipped.len()));
        for row in &summary.skipped {
            text.push_str(&format!("\n  line {}: {}", row.line, row.reason));
        }
    }
    text
}
