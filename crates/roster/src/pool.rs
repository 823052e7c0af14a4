//! The participant roster: an ordered pool with email and id de-duplication.

use crate::csv::{self, SkippedRow};
use chrono::Utc;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use teamup_core::{EventSink, FormationEvent, NullSink, Person, RosterError};
use tracing::{debug, info, warn};

/// Outcome of loading a CSV file into a [`Roster`].
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// The file that was read
    pub source: PathBuf,
    /// Valid rows read from the file
    pub loaded: usize,
    /// Rows that joined the roster
    pub added: usize,
    /// Valid rows refused because their email or id was already registered
    pub duplicates: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Ordered participant pool. Ids are unique, and so are emails (compared
/// case-insensitively).
pub struct Roster {
    persons: Vec<Person>,
    sink: Arc<dyn EventSink>,
}

impl Roster {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NullSink))
    }

    /// A roster that reports additions, duplicates and skipped rows to `sink`.
    pub fn with_sink(sink: Arc<dyn EventSink>) -> Self {
        Self {
            persons: Vec::new(),
            sink,
        }
    }

    /// Add a participant. A duplicate email or id is rejected and the
    /// existing entry is left untouched.
    pub fn add(&mut self, person: Person) -> Result<(), RosterError> {
        let (field, err) = if self.contains_email(&person.email) {
            ("email", RosterError::DuplicateEmail(person.email.clone()))
        } else if self.find_by_id(&person.id).is_some() {
            ("id", RosterError::DuplicateId(person.id.clone()))
        } else {
            self.sink.emit(FormationEvent::ParticipantAdded {
                person_id: person.id.clone(),
                name: person.name.clone(),
                timestamp: Utc::now(),
            });
            self.persons.push(person);
            return Ok(());
        };

        self.sink.emit(FormationEvent::DuplicateRejected {
            person_id: person.id,
            email: person.email,
            field: field.into(),
            timestamp: Utc::now(),
        });
        Err(err)
    }

    /// Add many participants, returning `(added, rejected)`.
    pub fn extend(&mut self, persons: impl IntoIterator<Item = Person>) -> (usize, usize) {
        let mut added = 0;
        let mut rejected = 0;
        for person in persons {
            match self.add(person) {
                Ok(()) => added += 1,
                Err(_) => rejected += 1,
            }
        }
        (added, rejected)
    }

    /// Import a participants CSV and add every valid row.
    pub fn load_csv(&mut self, path: &Path) -> Result<LoadSummary, RosterError> {
        let report = csv::import_participants(path)?;
        for row in &report.skipped {
            self.sink.emit(FormationEvent::RowSkipped {
                line: row.line,
                reason: row.reason.clone(),
                timestamp: Utc::now(),
            });
        }
        let loaded = report.persons.len();
        let (added, duplicates) = self.extend(report.persons);
        info!(path = %path.display(), loaded, added, duplicates, "Loaded participants");
        Ok(LoadSummary {
            source: path.to_path_buf(),
            loaded,
            added,
            duplicates,
            skipped: report.skipped,
        })
    }

    /// Load the persisted roster, falling back to `sample` when the roster
    /// file is missing, empty or holds no valid rows.
    pub fn auto_load(&mut self, roster_file: &Path, sample: &Path) -> Result<LoadSummary, RosterError> {
        match self.load_csv(roster_file) {
            Ok(summary) => Ok(summary),
            Err(RosterError::FileProcessing(reason)) => {
                warn!(path = %roster_file.display(), %reason, "Roster file unusable, loading sample");
                self.load_csv(sample)
            }
            Err(e) => Err(e),
        }
    }

    /// Merge the current roster into the file at `path`; rows already in the
    /// file win. Returns the number of participants written.
    pub fn save_merged(&self, path: &Path) -> Result<usize, RosterError> {
        csv::save_merged(path, &self.persons)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.persons.iter().any(|p| p.same_email(email))
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn clear(&mut self) {
        debug!(count = self.persons.len(), "Clearing roster");
        self.persons.clear();
    }

    /// A `P###` identifier one past the highest numeric id in use, or the
    /// lowest free number once the highest is `u64::MAX`.
    pub fn next_participant_id(&self) -> String {
        let used: HashSet<u64> = self
            .persons
            .iter()
            .filter_map(|p| p.id.strip_prefix('P')?.parse::<u64>().ok())
            .collect();
        let next = match used.iter().max() {
            None => 1,
            Some(highest) => highest
                .checked_add(1)
                .or_else(|| (1..u64::MAX).find(|n| !used.contains(n)))
                .unwrap_or(0),
        };
        format!("P{next:03}")
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Roster")
            .field("persons", &self.persons.len())
            .finish_non_exhaustive()
    }
}
