//! Participants: survey-profiled persons with a derived personality type.
//!
//! A [`Person`] is created once (from a survey or a CSV import) with all
//! fields populated. The personality type is never stored independently of
//! the score: it is derived on construction and re-derived whenever the score
//! changes through [`Person::set_personality_score`].

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Personality classification derived from a 0–100 personality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PersonalityType {
    Leader,
    Balanced,
    Thinker,
    Unknown,
}

impl PersonalityType {
    /// `[90,100]` → Leader, `[70,90)` → Balanced, `[50,70)` → Thinker, else Unknown.
    pub fn classify(score: u8) -> Self {
        match score {
            90..=100 => Self::Leader,
            70..=89 => Self::Balanced,
            50..=69 => Self::Thinker,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leader => "Leader",
            Self::Balanced => "Balanced",
            Self::Thinker => "Thinker",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed set of preferred playing roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Role {
    Strategist,
    Attacker,
    Defender,
    Supporter,
    Coordinator,
}

impl Role {
    /// Every role, in canonical menu order.
    pub const ALL: [Role; 5] = [
        Role::Strategist,
        Role::Attacker,
        Role::Defender,
        Role::Supporter,
        Role::Coordinator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strategist => "Strategist",
            Self::Attacker => "Attacker",
            Self::Defender => "Defender",
            Self::Supporter => "Supporter",
            Self::Coordinator => "Coordinator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
                format!("Invalid role: {wanted}. Valid roles are: {}", valid.join(", "))
            })
    }
}

/// A participant profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    /// Identifier, unique within a pool (e.g. `P001`)
    pub id: String,

    pub name: String,

    pub age: u8,

    /// Dedup key: compared case-insensitively by the roster
    pub email: String,

    personality_score: u8,

    personality_type: PersonalityType,

    /// Preferred game or sport
    pub preferred_activity: String,

    pub preferred_role: Role,

    /// Self-rated skill, 1–10
    pub skill_level: u8,
}

impl Person {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u8,
        email: impl Into<String>,
        personality_score: u8,
        preferred_activity: impl Into<String>,
        preferred_role: Role,
        skill_level: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            email: email.into(),
            personality_score,
            personality_type: PersonalityType::classify(personality_score),
            preferred_activity: preferred_activity.into(),
            preferred_role,
            skill_level,
        }
    }

    pub fn personality_score(&self) -> u8 {
        self.personality_score
    }

    pub fn personality_type(&self) -> PersonalityType {
        self.personality_type
    }

    /// Update the score and re-derive the personality type.
    pub fn set_personality_score(&mut self, score: u8) {
        self.personality_score = score;
        self.personality_type = PersonalityType::classify(score);
    }

    pub fn is_leader(&self) -> bool {
        self.personality_type == PersonalityType::Leader
    }

    /// Case-insensitive email comparison used for duplicate detection.
    pub fn same_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            self.name, self.personality_type, self.preferred_role, self.preferred_activity
        )
    }
}
