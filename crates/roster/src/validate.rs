//! Field validators shared by survey intake and CSV import.
//!
//! Numeric validators take the raw parsed value as `i64` so that out-of-range
//! input is reported with the field's own message before narrowing.

use regex_lite::Regex;
use std::sync::LazyLock;
use teamup_core::{RosterError, Role};

pub const MIN_AGE: i64 = 16;
pub const MAX_AGE: i64 = 100;
pub const MIN_SKILL: i64 = 1;
pub const MAX_SKILL: i64 = 10;
pub const MAX_SCORE: i64 = 100;
pub const MAX_NAME_LEN: usize = 100;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

static PARTICIPANT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P\d+$").expect("participant id pattern compiles"));

pub fn name(value: &str) -> Result<(), RosterError> {
    if value.trim().is_empty() {
        return Err(RosterError::invalid("name", "Name cannot be empty"));
    }
    let len = value.chars().count();
    if len < 2 {
        return Err(RosterError::invalid("name", "Name must be at least 2 characters long"));
    }
    if len > MAX_NAME_LEN {
        return Err(RosterError::invalid(
            "name",
            format!("Name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), RosterError> {
    if value.trim().is_empty() {
        return Err(RosterError::invalid("email", "Email cannot be empty"));
    }
    if !EMAIL.is_match(value) {
        return Err(RosterError::invalid("email", format!("Invalid email format: {value}")));
    }
    Ok(())
}

pub fn age(value: i64) -> Result<u8, RosterError> {
    in_range(
        "age",
        value,
        MIN_AGE,
        MAX_AGE,
        format!("Age must be between {MIN_AGE} and {MAX_AGE}"),
    )
}

pub fn skill_level(value: i64) -> Result<u8, RosterError> {
    in_range(
        "skill level",
        value,
        MIN_SKILL,
        MAX_SKILL,
        format!("Skill level must be between {MIN_SKILL} and {MAX_SKILL}"),
    )
}

pub fn personality_score(value: i64) -> Result<u8, RosterError> {
    in_range(
        "personality score",
        value,
        0,
        MAX_SCORE,
        format!("Personality score must be between 0 and {MAX_SCORE}. Received: {value}"),
    )
}

/// Preferred game or sport: at least two characters.
pub fn activity(value: &str) -> Result<(), RosterError> {
    if value.trim().is_empty() {
        return Err(RosterError::invalid("activity", "Game/Sport cannot be empty"));
    }
    if value.chars().count() < 2 {
        return Err(RosterError::invalid(
            "activity",
            "Game/Sport name must be at least 2 characters long",
        ));
    }
    Ok(())
}

/// Parse a role name, case-insensitively.
pub fn role(value: &str) -> Result<Role, RosterError> {
    if value.trim().is_empty() {
        return Err(RosterError::invalid("role", "Role cannot be empty"));
    }
    value.parse().map_err(|reason: String| RosterError::invalid("role", reason))
}

pub fn id(value: &str) -> Result<(), RosterError> {
    if value.trim().is_empty() {
        return Err(RosterError::invalid("id", "ID cannot be empty"));
    }
    Ok(())
}

/// Generated identifiers: `P` followed by digits.
pub fn participant_id(value: &str) -> Result<(), RosterError> {
    id(value)?;
    if !PARTICIPANT_ID.is_match(value) {
        return Err(RosterError::invalid(
            "id",
            "ID must start with 'P' followed by numbers (e.g., P001)",
        ));
    }
    Ok(())
}

pub fn csv_path(value: &str) -> Result<(), RosterError> {
    if value.trim().is_empty() {
        return Err(RosterError::invalid("file path", "File path cannot be empty"));
    }
    if !value.trim().to_ascii_lowercase().ends_with(".csv") {
        return Err(RosterError::invalid(
            "file path",
            "File must be a CSV file (.csv extension)",
        ));
    }
    Ok(())
}

/// Parse an integer field, trimming surrounding whitespace.
pub fn number(field: &'static str, raw: &str) -> Result<i64, RosterError> {
    raw.trim()
        .parse()
        .map_err(|_| RosterError::invalid(field, format!("Invalid number format for {field}: {raw:?}")))
}

fn in_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
    message: String,
) -> Result<u8, RosterError> {
    if !(min..=max).contains(&value) {
        return Err(RosterError::invalid(field, message));
    }
    u8::try_from(value).map_err(|_| RosterError::invalid(field, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: RosterError) -> String {
        err.to_string()
    }

    #[test]
    fn name_length_bounds() {
        assert!(name("Al").is_ok());
        assert!(name(&"x".repeat(100)).is_ok());
        assert_eq!(reason(name("   ").unwrap_err()), "Name cannot be empty");
        assert_eq!(reason(name("A").unwrap_err()), "Name must be at least 2 characters long");
        assert!(name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn email_format() {
        assert!(email("ada.lovelace+teams@uni.example.edu").is_ok());
        assert!(email("a_b-c@x.io").is_ok());
        assert_eq!(reason(email("").unwrap_err()), "Email cannot be empty");
        for bad in ["plainaddress", "a@b", "a@b.c", "a b@c.com", "@c.com"] {
            assert!(email(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn numeric_ranges() {
        assert_eq!(age(16).unwrap(), 16);
        assert_eq!(age(100).unwrap(), 100);
        assert!(age(15).is_err());
        assert!(age(101).is_err());

        assert_eq!(skill_level(1).unwrap(), 1);
        assert_eq!(skill_level(10).unwrap(), 10);
        assert!(skill_level(0).is_err());
        assert!(skill_level(11).is_err());

        assert_eq!(personality_score(0).unwrap(), 0);
        assert_eq!(personality_score(100).unwrap(), 100);
        assert_eq!(
            reason(personality_score(-4).unwrap_err()),
            "Personality score must be between 0 and 100. Received: -4"
        );
        assert!(personality_score(300).is_err());
    }

    #[test]
    fn activity_needs_two_characters() {
        assert!(activity("Go").is_ok());
        assert!(activity("G").is_err());
        assert!(activity(" ").is_err());
    }

    #[test]
    fn role_is_case_insensitive() {
        assert_eq!(role("attacker").unwrap(), Role::Attacker);
        assert_eq!(role(" COORDINATOR ").unwrap(), Role::Coordinator);
        assert_eq!(reason(role("").unwrap_err()), "Role cannot be empty");
        let err = reason(role("Goalie").unwrap_err());
        assert!(err.starts_with("Invalid role: Goalie."));
        assert!(err.contains("Strategist, Attacker, Defender, Supporter, Coordinator"));
    }

    #[test]
    fn participant_id_format() {
        assert!(participant_id("P001").is_ok());
        assert!(participant_id("P7").is_ok());
        assert!(participant_id("p001").is_err());
        assert!(participant_id("P").is_err());
        assert!(participant_id("").is_err());
        assert!(id("anything").is_ok());
    }

    #[test]
    fn csv_extension_is_case_insensitive() {
        assert!(csv_path("data/participants.csv").is_ok());
        assert!(csv_path("DATA.CSV").is_ok());
        assert!(csv_path("data.txt").is_err());
        assert!(csv_path("").is_err());
    }

    #[test]
    fn number_parsing() {
        assert_eq!(number("SkillLevel", " 7 ").unwrap(), 7);
        assert_eq!(number("SkillLevel", "-3").unwrap(), -3);
        assert!(number("SkillLevel", "seven").is_err());
    }
}
