//! Skill-based strategy: a snake draft over participants sorted by skill.

use crate::cursor::SnakeCursor;
use crate::strategy::{planned_teams, Partitioner, StrategyKind, LEADER_CAP};
use teamup_core::{Person, Team};

#[derive(Debug, Default, Clone, Copy)]
pub struct SkillBased;

impl Partitioner for SkillBased {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SkillBased
    }

    /// Draft highest skill first, walking the teams `T1..Tn` then `Tn..T1`.
    ///
    /// A Leader drawn for a team that already holds [`LEADER_CAP`] Leaders is
    /// consumed without being placed; teams can therefore end up short. The
    /// draft stops once every team is full, leaving any remainder unassigned.
    fn partition(&self, pool: &[Person], team_size: usize) -> Vec<Team> {
        let mut sorted: Vec<&Person> = pool.iter().collect();
        // stable: equal skills keep pool order
        sorted.sort_by(|a, b| b.skill_level.cmp(&a.skill_level));

        let mut teams = planned_teams(pool.len(), team_size);
        let team_count = teams.len();
        let mut cursor = SnakeCursor::new(team_count);
        let mut next = 0;

        while next < sorted.len() && teams.iter().any(|t| !t.is_full()) {
            for team_idx in cursor.by_ref().take(team_count) {
                if next >= sorted.len() {
                    break;
                }
                let team = &mut teams[team_idx];
                if team.is_full() {
                    continue;
                }
                let candidate = sorted[next];
                next += 1;
                if candidate.is_leader() && team.leader_count() >= LEADER_CAP {
                    continue;
                }
                // Cannot fail: the team has room and `validate` rejects shared ids
                let _ = team.add_member(candidate.clone());
            }
        }

        teams
    }
}
