//! Error types for the TeamUp domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; [`Error`] wraps them all.

use thiserror::Error;

/// The top-level error type for all TeamUp operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Team formation ---
    #[error("Formation error: {0}")]
    Formation(#[from] FormationError),

    // --- Roster / import / export ---
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    // --- Team membership ---
    #[error("Team error: {0}")]
    Team(#[from] TeamError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures raised by the validator before any partitioning runs.
///
/// Always recoverable: the caller can pick another team size or fix the
/// pool and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormationError {
    #[error("{0}")]
    InsufficientParticipants(String),

    /// Two members of the pool share an identifier
    #[error("Duplicate participant ID: {0}")]
    DuplicateParticipant(String),
}

impl FormationError {
    /// The human-readable reason carried by the error.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamError {
    #[error("team {team_id} is full (capacity {capacity})")]
    Full { team_id: String, capacity: usize },

    #[error("{person_id} is already a member of team {team_id}")]
    DuplicateMember { team_id: String, person_id: String },
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Duplicate email rejected: {0}")]
    DuplicateEmail(String),

    #[error("Duplicate participant ID rejected: {0}")]
    DuplicateId(String),

    #[error("{reason}")]
    Validation { field: &'static str, reason: String },

    #[error("File processing failed: {0}")]
    FileProcessing(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RosterError {
    /// Shorthand for a field validation failure.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_participants_displays_reason_verbatim() {
        let err = FormationError::InsufficientParticipants(
            "Need at least 3 participants. Available: 2".into(),
        );
        assert_eq!(err.to_string(), "Need at least 3 participants. Available: 2");
        assert_eq!(err.reason(), "Need at least 3 participants. Available: 2");
    }

    #[test]
    fn duplicate_participant_names_the_id() {
        let err = FormationError::DuplicateParticipant("P002".into());
        assert_eq!(err.reason(), "Duplicate participant ID: P002");
    }

    #[test]
    fn formation_error_wraps_into_top_level() {
        let err: Error = FormationError::InsufficientParticipants("No participants available".into()).into();
        assert!(err.to_string().starts_with("Formation error:"));
        assert!(err.to_string().contains("No participants available"));
    }

    #[test]
    fn roster_validation_error_names_field() {
        let err = RosterError::invalid("email", "Invalid email format: nope");
        assert!(err.to_string().contains("email"));
        assert!(err.to_string().contains("nope"));
    }
}
