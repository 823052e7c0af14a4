//! Participant roster for TeamUp.
//!
//! Holds the pool of participants that formation runs over, validates
//! survey and CSV input field by field, and moves participants and formed
//! teams in and out of CSV files.

mod csv;
mod pool;
pub mod validate;

pub use csv::{
    csv_escape, export_participants, export_teams, import_participants, save_merged, ImportReport,
    SkippedRow, DEFAULT_AGE, PARTICIPANT_HEADER, TEAM_HEADER,
};
pub use pool::{LoadSummary, Roster};
