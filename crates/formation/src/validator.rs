//! Constraint validator — feasibility checks run before every strategy.

use crate::strategy::MIN_TEAM_SIZE;
use std::collections::HashSet;
use teamup_core::{FormationError, Person};

/// Number of full teams a pool can supply: `floor(pool / team_size)`.
pub fn number_of_teams(pool_size: usize, team_size: usize) -> usize {
    if team_size == 0 {
        return 0;
    }
    pool_size / team_size
}

/// Check a pool and team size against the formation rules.
///
/// Checks run in order and stop at the first failure:
/// 1. the pool is non-empty
/// 2. every participant id is unique
/// 3. `team_size >= 3`
/// 4. the pool holds at least one team's worth of participants
/// 5. there is at least one Leader per team that will be formed
pub fn validate(pool: &[Person], team_size: usize) -> Result<(), FormationError> {
    if pool.is_empty() {
        return Err(FormationError::InsufficientParticipants(
            "No participants available".into(),
        ));
    }

    let mut seen = HashSet::with_capacity(pool.len());
    if let Some(dup) = pool.iter().find(|p| !seen.insert(p.id.as_str())) {
        return Err(FormationError::DuplicateParticipant(dup.id.clone()));
    }

    if team_size < MIN_TEAM_SIZE {
        return Err(FormationError::InsufficientParticipants(format!(
            "Team size must be at least {MIN_TEAM_SIZE}"
        )));
    }

    if pool.len() < team_size {
        return Err(FormationError::InsufficientParticipants(format!(
            "Need at least {team_size} participants. Available: {}",
            pool.len()
        )));
    }

    let teams = number_of_teams(pool.len(), team_size);
    let leaders = pool.iter().filter(|p| p.is_leader()).count();
    if leaders < teams {
        return Err(FormationError::InsufficientParticipants(format!(
            "Insufficient leaders. Need at least {teams} leaders, have {leaders}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamup_core::Role;

    fn pool(leaders: usize, others: usize) -> Vec<Person> {
        (0..leaders + others)
            .map(|i| {
                let score = if i < leaders { 95 } else { 60 };
                Person::new(
                    format!("P{i:03}"),
                    format!("Player {i}"),
                    20,
                    format!("p{i}@example.com"),
                    score,
                    "Chess",
                    Role::Attacker,
                    5,
                )
            })
            .collect()
    }

    fn reason(result: Result<(), FormationError>) -> String {
        result.unwrap_err().reason()
    }

    #[test]
    fn empty_pool_rejected_first() {
        assert_eq!(reason(validate(&[], 1)), "No participants available");
    }

    #[test]
    fn small_team_size_rejected() {
        let p = pool(3, 6);
        for size in 0..3 {
            assert_eq!(reason(validate(&p, size)), "Team size must be at least 3");
        }
    }

    #[test]
    fn pool_smaller_than_team() {
        let p = pool(2, 0);
        assert_eq!(
            reason(validate(&p, 3)),
            "Need at least 3 participants. Available: 2"
        );
    }

    #[test]
    fn five_people_teams_of_three_passes_size_check() {
        let p = pool(1, 4);
        assert!(validate(&p, 3).is_ok());
    }

    #[test]
    fn leader_shortage_rejected() {
        let p = pool(2, 7);
        assert_eq!(
            reason(validate(&p, 3)),
            "Insufficient leaders. Need at least 3 leaders, have 2"
        );
    }

    #[test]
    fn checks_short_circuit_in_order() {
        // Too small for a team AND no leaders: the size message wins.
        let p = pool(0, 2);
        assert!(reason(validate(&p, 3)).starts_with("Need at least 3"));
    }

    #[test]
    fn shared_id_rejected_before_size_checks() {
        let mut p = pool(3, 6);
        p[5].id = p[4].id.clone();
        let err = validate(&p, 3).unwrap_err();
        assert_eq!(err, FormationError::DuplicateParticipant("P004".into()));
        assert_eq!(reason(validate(&p, 2)), "Duplicate participant ID: P004");
    }

    #[test]
    fn number_of_teams_floors() {
        assert_eq!(number_of_teams(10, 3), 3);
        assert_eq!(number_of_teams(9, 3), 3);
        assert_eq!(number_of_teams(2, 3), 0);
        assert_eq!(number_of_teams(5, 0), 0);
    }
}
