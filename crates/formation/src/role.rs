//! Role-based strategy: spread each preferred-role group across the teams.

use crate::cursor::RoundRobinCursor;
use crate::strategy::{planned_teams, Partitioner, StrategyKind, LEADER_CAP};
use teamup_core::{Person, Role, Team};

#[derive(Debug, Default, Clone, Copy)]
pub struct RoleBased;

impl Partitioner for RoleBased {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RoleBased
    }

    /// Deal each role group round-robin across `T1..Tn`.
    ///
    /// One cursor is shared by every group, so the next group starts where
    /// the previous one stopped. Full teams are skipped. A Leader whose target
    /// team already holds [`LEADER_CAP`] Leaders is not placed; the cursor
    /// still moves on by one team.
    fn partition(&self, pool: &[Person], team_size: usize) -> Vec<Team> {
        let mut teams = planned_teams(pool.len(), team_size);
        let mut cursor = RoundRobinCursor::new(teams.len());

        for (_, group) in group_by_role(pool) {
            for candidate in group {
                let Some(target) = cursor.seek(|i| !teams[i].is_full()) else {
                    continue;
                };
                let team = &mut teams[target];
                if candidate.is_leader() && team.leader_count() >= LEADER_CAP {
                    cursor.advance();
                    continue;
                }
                // Cannot fail: the team has room and `validate` rejects shared ids
                let _ = team.add_member(candidate.clone());
                cursor.advance();
            }
        }

        teams
    }
}

/// Group the pool by preferred role: groups in first-seen role order,
/// members in pool order.
fn group_by_role(pool: &[Person]) -> Vec<(Role, Vec<&Person>)> {
    let mut groups: Vec<(Role, Vec<&Person>)> = Vec::new();
    for person in pool {
        match groups.iter_mut().find(|(role, _)| *role == person.preferred_role) {
            Some((_, members)) => members.push(person),
            None => groups.push((person.preferred_role, vec![person])),
        }
    }
    groups
}
