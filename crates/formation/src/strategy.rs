//! The partitioning seam: the [`Partitioner`] trait and the strategy catalogue.

use crate::validator::number_of_teams;
use crate::{Balanced, RoleBased, SkillBased};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use teamup_core::{Person, Team};

/// No team may hold more than this many Leaders.
pub const LEADER_CAP: usize = 2;

/// Balanced strategy, primary pass: at most this many members per activity.
pub const ACTIVITY_CAP: usize = 2;

/// Smallest team size the validator accepts.
pub const MIN_TEAM_SIZE: usize = 3;

/// A partitioning algorithm.
///
/// Implementations assume the input already passed [`crate::validate`]. They
/// are pure: the caller's pool is only read, and the result is a fresh list of
/// teams `T1..Tn`.
pub trait Partitioner: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn partition(&self, pool: &[Person], team_size: usize) -> Vec<Team>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Activity diversity with a leader seed per team
    Balanced,
    /// Snake draft over skill level
    SkillBased,
    /// Round-robin over preferred-role groups
    RoleBased,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Balanced,
        StrategyKind::SkillBased,
        StrategyKind::RoleBased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::SkillBased => "skill-based",
            Self::RoleBased => "role-based",
        }
    }

    pub fn partitioner(&self) -> Box<dyn Partitioner> {
        match self {
            Self::Balanced => Box::new(Balanced),
            Self::SkillBased => Box::new(SkillBased),
            Self::RoleBased => Box::new(RoleBased),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" | "1" => Ok(Self::Balanced),
            "skill" | "skill-based" | "skill_based" | "2" => Ok(Self::SkillBased),
            "role" | "role-based" | "role_based" | "3" => Ok(Self::RoleBased),
            other => Err(format!(
                "Unknown strategy '{other}'. Expected balanced, skill-based or role-based"
            )),
        }
    }
}

/// Empty teams `T1..Tn` for a pool, `n = floor(pool / team_size)`.
pub(crate) fn planned_teams(pool_size: usize, team_size: usize) -> Vec<Team> {
    (1..=number_of_teams(pool_size, team_size))
        .map(|i| Team::new(format!("T{i}"), team_size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names_parse() {
        assert_eq!("balanced".parse::<StrategyKind>().unwrap(), StrategyKind::Balanced);
        assert_eq!("Skill".parse::<StrategyKind>().unwrap(), StrategyKind::SkillBased);
        assert_eq!("role-based".parse::<StrategyKind>().unwrap(), StrategyKind::RoleBased);
        assert_eq!("3".parse::<StrategyKind>().unwrap(), StrategyKind::RoleBased);
        assert!("random".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
            assert_eq!(kind.partitioner().kind(), kind);
        }
    }

    #[test]
    fn planned_teams_are_numbered_from_one() {
        let teams = planned_teams(10, 3);
        let ids: Vec<&str> = teams.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2", "T3"]);
        assert!(teams.iter().all(|t| t.capacity() == 3 && t.is_empty()));
    }
}
