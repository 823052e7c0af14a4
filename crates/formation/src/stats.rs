//! Statistics aggregation over formed teams.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use teamup_core::{Person, PersonalityType, Role, Team};

/// Aggregate metrics for a list of teams.
///
/// Distributions count every member of every team once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamStatistics {
    pub team_count: usize,
    pub total_members: usize,
    pub average_team_size: f64,
    /// Mean skill over all members of all teams
    pub average_skill: f64,
    /// Mean of the per-team diversity scores
    pub average_diversity: f64,
    pub personality_distribution: BTreeMap<PersonalityType, usize>,
    pub role_distribution: BTreeMap<Role, usize>,
    pub activity_distribution: BTreeMap<String, usize>,
}

/// Compute [`TeamStatistics`]. Pure; an empty slice yields all zeros.
pub fn aggregate(teams: &[Team]) -> TeamStatistics {
    let mut stats = TeamStatistics {
        team_count: teams.len(),
        ..TeamStatistics::default()
    };
    if teams.is_empty() {
        return stats;
    }

    let mut skill_total: u64 = 0;
    let mut diversity_total = 0;
    for team in teams {
        stats.total_members += team.len();
        diversity_total += team.diversity_score();
        for member in team.members() {
            skill_total += u64::from(member.skill_level);
            *stats
                .personality_distribution
                .entry(member.personality_type())
                .or_insert(0) += 1;
            *stats.role_distribution.entry(member.preferred_role).or_insert(0) += 1;
            *stats
                .activity_distribution
                .entry(member.preferred_activity.clone())
                .or_insert(0) += 1;
        }
    }

    stats.average_team_size = stats.total_members as f64 / teams.len() as f64;
    stats.average_diversity = diversity_total as f64 / teams.len() as f64;
    if stats.total_members > 0 {
        stats.average_skill = skill_total as f64 / stats.total_members as f64;
    }
    stats
}

/// Participants of `pool` that appear in none of `teams`, in pool order.
///
/// Membership is matched by id, which [`crate::validate`] keeps unique.
pub fn unassigned<'a>(pool: &'a [Person], teams: &[Team]) -> Vec<&'a Person> {
    let placed: HashSet<&str> = teams
        .iter()
        .flat_map(|t| t.members().iter().map(|m| m.id.as_str()))
        .collect();
    pool.iter().filter(|p| !placed.contains(p.id.as_str())).collect()
}
