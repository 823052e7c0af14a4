//! CSV import and export of participants and teams.
//!
//! Participant files use one 8-column layout for both directions:
//!
//! ```text
//! ID,Name,Email,PreferredGame,SkillLevel,PreferredRole,PersonalityScore,PersonalityType
//! ```
//!
//! On import the trailing `PersonalityType` column is ignored and re-derived
//! from the score. Age is not carried by the file and defaults to
//! [`DEFAULT_AGE`]. Team exports are one row per member.

use crate::validate;
use std::path::Path;
use teamup_core::{Person, RosterError, Team};
use tracing::{debug, info, warn};

pub const PARTICIPANT_HEADER: &str =
    "ID,Name,Email,PreferredGame,SkillLevel,PreferredRole,PersonalityScore,PersonalityType";

pub const TEAM_HEADER: &str = "TeamID,TeamName,TeamSize,MemberID,MemberName,Age,Email,PersonalityType,PersonalityScore,PreferredGame,Role,SkillLevel";

/// Age assigned to imported participants.
pub const DEFAULT_AGE: u8 = 20;

const PARTICIPANT_COLUMNS: usize = 8;

/// A data row that failed to parse or validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file
    pub line: usize,
    pub reason: String,
}

/// Result of a participant import: valid rows in file order, plus the rows
/// that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub persons: Vec<Person>,
    pub skipped: Vec<SkippedRow>,
}

/// Read participants from a CSV file with a header row.
///
/// Malformed rows are skipped and reported. A missing file, an empty file or
/// a file with no valid rows is a [`RosterError::FileProcessing`].
pub fn import_participants(path: &Path) -> Result<ImportReport, RosterError> {
    if !path.is_file() {
        return Err(RosterError::FileProcessing(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut records = split_records(content.trim_start_matches('\u{feff}')).into_iter();
    if records.next().is_none() {
        return Err(RosterError::FileProcessing("CSV file is empty".into()));
    }

    let mut report = ImportReport::default();
    for record in records {
        let result = record
            .fields
            .map_err(|reason| RosterError::invalid("row", reason))
            .and_then(|fields| {
                if is_blank(&fields) {
                    Ok(None)
                } else {
                    parse_participant(&fields).map(Some)
                }
            })
            .and_then(|parsed| match parsed {
                Some(person) if report.persons.iter().any(|p| p.id == person.id) => Err(
                    RosterError::invalid("id", format!("Duplicate participant ID: {}", person.id)),
                ),
                other => Ok(other),
            });
        match result {
            Ok(Some(person)) => report.persons.push(person),
            Ok(None) => {}
            Err(e) => {
                debug!(line = record.line, error = %e, "Skipping CSV row");
                report.skipped.push(SkippedRow {
                    line: record.line,
                    reason: e.to_string(),
                });
            }
        }
    }

    if report.persons.is_empty() {
        return Err(RosterError::FileProcessing(format!(
            "No valid participants found. Errors: {}",
            report.skipped.len()
        )));
    }

    info!(
        path = %path.display(),
        loaded = report.persons.len(),
        skipped = report.skipped.len(),
        "Imported participants"
    );
    Ok(report)
}

/// Write participants in the import layout. Parent directories are created.
pub fn export_participants(path: &Path, persons: &[Person]) -> Result<(), RosterError> {
    let mut out = String::with_capacity(64 * (persons.len() + 1));
    out.push_str(PARTICIPANT_HEADER);
    out.push('\n');
    for p in persons {
        let row = [
            csv_escape(&p.id),
            csv_escape(&p.name),
            csv_escape(&p.email),
            csv_escape(&p.preferred_activity),
            p.skill_level.to_string(),
            csv_escape(p.preferred_role.as_str()),
            p.personality_score().to_string(),
            csv_escape(p.personality_type().as_str()),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    write_file(path, &out)?;
    info!(path = %path.display(), count = persons.len(), "Exported participants");
    Ok(())
}

/// Write one row per team member. Parent directories are created.
pub fn export_teams(path: &Path, teams: &[Team]) -> Result<(), RosterError> {
    let mut out = String::new();
    out.push_str(TEAM_HEADER);
    out.push('\n');
    for team in teams {
        for m in team.members() {
            let row = [
                csv_escape(&team.id),
                csv_escape(&team.name),
                team.len().to_string(),
                csv_escape(&m.id),
                csv_escape(&m.name),
                m.age.to_string(),
                csv_escape(&m.email),
                csv_escape(m.personality_type().as_str()),
                m.personality_score().to_string(),
                csv_escape(&m.preferred_activity),
                csv_escape(m.preferred_role.as_str()),
                m.skill_level.to_string(),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }
    }
    write_file(path, &out)?;
    info!(path = %path.display(), teams = teams.len(), "Exported teams");
    Ok(())
}

/// Merge `persons` into the participants file at `path` by email and write it
/// back. Rows already in the file win over incoming ones with the same email
/// or id.
///
/// Returns the number of participants in the written file.
pub fn save_merged(path: &Path, persons: &[Person]) -> Result<usize, RosterError> {
    let mut merged = if path.is_file() {
        match import_participants(path) {
            Ok(report) => report.persons,
            Err(RosterError::FileProcessing(reason)) => {
                warn!(path = %path.display(), %reason, "Existing roster unreadable, rewriting");
                Vec::new()
            }
            Err(e) => return Err(e),
        }
    } else {
        Vec::new()
    };

    let existing = merged.len();
    for person in persons {
        if !merged.iter().any(|p| p.same_email(&person.email) || p.id == person.id) {
            merged.push(person.clone());
        }
    }
    export_participants(path, &merged)?;
    debug!(existing, added = merged.len() - existing, "Merged roster");
    Ok(merged.len())
}

/// Quote a field if it contains a comma, quote or newline; embedded quotes
/// are doubled.
pub fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), RosterError> {
    let io_err = |source| RosterError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, content).map_err(io_err)
}

fn parse_participant(fields: &[String]) -> Result<Person, RosterError> {
    if fields.len() < PARTICIPANT_COLUMNS {
        return Err(RosterError::invalid(
            "row",
            format!(
                "Insufficient columns (expected {PARTICIPANT_COLUMNS}, got {})",
                fields.len()
            ),
        ));
    }

    let id = fields[0].trim();
    let name = fields[1].trim();
    let email = fields[2].trim();
    let activity = fields[3].trim();
    let skill = validate::number("SkillLevel", &fields[4])?;
    let role = fields[5].trim();
    let score = validate::number("PersonalityScore", &fields[6])?;

    validate::id(id)?;
    validate::name(name)?;
    validate::email(email)?;
    validate::activity(activity)?;
    let skill = validate::skill_level(skill)?;
    let role = validate::role(role)?;
    let score = validate::personality_score(score)?;

    Ok(Person::new(id, name, DEFAULT_AGE, email, score, activity, role, skill))
}

fn is_blank(fields: &[String]) -> bool {
    fields.iter().all(|f| f.trim().is_empty())
}

struct Record {
    line: usize,
    fields: Result<Vec<String>, String>,
}

/// Split CSV text into records. Quoted fields may contain commas, doubled
/// quotes and newlines; `\r` outside quotes is dropped.
fn split_records(content: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut start_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push(Record {
                    line: start_line,
                    fields: Ok(std::mem::take(&mut fields)),
                });
                line += 1;
                start_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        records.push(Record {
            line: start_line,
            fields: Err("Unterminated quoted field".into()),
        });
    } else if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(Record {
            line: start_line,
            fields: Ok(fields),
        });
    }
    records
}
