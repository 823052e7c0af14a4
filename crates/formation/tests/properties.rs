//! Formation invariants checked over many generated pools.
//!
//! These exercise the public API the way the CLI does: validate, partition,
//! aggregate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use teamup_core::{FormationError, FormationEvent, Person, RecordingSink, Role};
use teamup_formation::{
    aggregate, unassigned, validate, Balanced, FormationService, Partitioner, StrategyKind,
    WorkerPool, ACTIVITY_CAP, LEADER_CAP,
};

const GAMES: [&str; 10] = [
    "Valorant",
    "DOTA 2",
    "FIFA",
    "CS:GO",
    "Chess",
    "Basketball",
    "Badminton",
    "Football",
    "Cricket",
    "Table Tennis",
];

// ── Pool generation ──────────────────────────────────────────────────────

fn person(i: usize, score: u8, game: &str, role: Role, skill: u8) -> Person {
    Person::new(
        format!("P{i:03}"),
        format!("Participant {i}"),
        20,
        format!("participant{i}@university.edu"),
        score,
        game,
        role,
        skill,
    )
}

fn random_pool(rng: &mut StdRng, size: usize, games: usize) -> Vec<Person> {
    (0..size)
        .map(|i| {
            let score = if rng.gen_bool(0.3) {
                rng.gen_range(90..=100)
            } else {
                rng.gen_range(30..90)
            };
            person(
                i,
                score,
                GAMES[rng.gen_range(0..games)],
                Role::ALL[rng.gen_range(0..Role::ALL.len())],
                rng.gen_range(1..=10),
            )
        })
        .collect()
}

/// Random (pool, team size) pairs that pass validation.
fn valid_cases(seed: u64, count: usize) -> Vec<(Vec<Person>, usize)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cases = Vec::new();
    while cases.len() < count {
        let size = rng.gen_range(3..=40);
        let games = rng.gen_range(1..=GAMES.len());
        let pool = random_pool(&mut rng, size, games);
        let team_size = rng.gen_range(3..=6);
        if validate(&pool, team_size).is_ok() {
            cases.push((pool, team_size));
        }
    }
    cases
}

// ── Validator ────────────────────────────────────────────────────────────

#[test]
fn team_sizes_below_three_always_fail() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let size = rng.gen_range(1..=30);
        let pool = random_pool(&mut rng, size, 5);
        for team_size in 0..3 {
            let err = validate(&pool, team_size).unwrap_err();
            assert_eq!(err.reason(), "Team size must be at least 3");
        }
    }
}

#[test]
fn leader_shortage_always_fails() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let size = rng.gen_range(3..=40);
        let pool = random_pool(&mut rng, size, 5);
        let team_size = rng.gen_range(3..=6);
        if pool.len() < team_size {
            continue;
        }
        let leaders = pool.iter().filter(|p| p.is_leader()).count();
        let result = validate(&pool, team_size);
        if leaders < pool.len() / team_size {
            assert!(result.unwrap_err().reason().starts_with("Insufficient leaders"));
        } else {
            assert!(result.is_ok());
        }
    }
}

// ── Strategy invariants ──────────────────────────────────────────────────

#[test]
fn shared_ids_always_fail() {
    let mut rng = StdRng::seed_from_u64(23);
    for (mut pool, team_size) in valid_cases(23, 100) {
        let from = rng.gen_range(0..pool.len());
        let to = (from + rng.gen_range(1..pool.len())) % pool.len();
        pool[to].id = pool[from].id.clone();
        assert!(matches!(
            validate(&pool, team_size),
            Err(FormationError::DuplicateParticipant(ref id)) if *id == pool[from].id
        ));
    }
}

#[test]
fn no_team_exceeds_capacity_or_leader_cap() {
    for (pool, team_size) in valid_cases(42, 150) {
        for kind in StrategyKind::ALL {
            for team in kind.partitioner().partition(&pool, team_size) {
                assert!(team.len() <= team_size, "{kind}: {} over capacity", team.id);
                assert!(team.leader_count() <= LEADER_CAP, "{kind}: {} over leader cap", team.id);
            }
        }
    }
}

#[test]
fn nobody_is_placed_twice() {
    for (pool, team_size) in valid_cases(43, 150) {
        for kind in StrategyKind::ALL {
            let teams = kind.partitioner().partition(&pool, team_size);
            let mut seen = HashSet::new();
            for member in teams.iter().flat_map(|t| t.members()) {
                assert!(seen.insert(member.id.clone()), "{kind}: {} placed twice", member.id);
            }
        }
    }
}

#[test]
fn balanced_fills_every_slot() {
    for (pool, team_size) in valid_cases(44, 150) {
        let expected_teams = pool.len() / team_size;
        // Teams only run short when the leader cap blocks the last candidates;
        // enough non-leaders rules that out.
        let non_leaders = pool.iter().filter(|p| !p.is_leader()).count();
        if non_leaders < expected_teams * (team_size - 1) {
            continue;
        }
        let teams = Balanced.partition(&pool, team_size);
        assert_eq!(teams.len(), expected_teams);
        assert!(teams.iter().all(|t| t.is_full()));
        assert_eq!(
            unassigned(&pool, &teams).len(),
            pool.len() - expected_teams * team_size
        );
    }
}

#[test]
fn balanced_respects_activity_cap_when_activities_are_plentiful() {
    // With enough distinct activities the primary pass alone fills each team,
    // so no activity appears more than ACTIVITY_CAP times.
    let mut pool = Vec::new();
    for i in 0..30 {
        let score = if i % 5 == 0 { 95 } else { 60 };
        pool.push(person(i, score, GAMES[i % GAMES.len()], Role::ALL[i % 5], 5));
    }
    for team in Balanced.partition(&pool, 5) {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for m in team.members() {
            *counts.entry(m.preferred_activity.as_str()).or_insert(0) += 1;
        }
        assert!(counts.values().all(|&c| c <= ACTIVITY_CAP), "{}: {counts:?}", team.id);
    }
}

#[test]
fn strategies_do_not_consume_the_callers_pool() {
    for (pool, team_size) in valid_cases(45, 20) {
        let before = pool.clone();
        for kind in StrategyKind::ALL {
            let _ = kind.partitioner().partition(&pool, team_size);
        }
        assert_eq!(pool, before);
    }
}

#[test]
fn strategies_are_deterministic() {
    for (pool, team_size) in valid_cases(46, 30) {
        for kind in StrategyKind::ALL {
            let a = kind.partitioner().partition(&pool, team_size);
            let b = kind.partitioner().partition(&pool, team_size);
            assert_eq!(a, b);
        }
    }
}

#[test]
fn run_events_account_for_every_participant() {
    for (pool, team_size) in valid_cases(31, 100) {
        for kind in StrategyKind::ALL {
            let sink = Arc::new(RecordingSink::new());
            let mut service = FormationService::with_pool(sink.clone(), WorkerPool::new(1));
            let teams = service.form(kind, &pool, team_size).unwrap();
            let placed: usize = teams.iter().map(|t| t.len()).sum();
            let left_out = unassigned(&pool, &teams);
            assert_eq!(placed + left_out.len(), pool.len(), "{kind}");

            let events = sink.events();
            let dropped = events
                .iter()
                .filter(|e| matches!(e, FormationEvent::CandidateDropped { .. }))
                .count();
            assert_eq!(dropped, pool.len() - placed, "{kind}");
            match events.last() {
                Some(FormationEvent::RunCompleted {
                    assigned,
                    unassigned,
                    ..
                }) => {
                    assert_eq!(*assigned, placed, "{kind}");
                    assert_eq!(*unassigned, pool.len() - placed, "{kind}");
                }
                other => panic!("{kind}: last event {other:?}"),
            }
        }
    }
}

#[test]
fn statistics_agree_with_teams() {
    for (pool, team_size) in valid_cases(47, 50) {
        for kind in StrategyKind::ALL {
            let teams = kind.partitioner().partition(&pool, team_size);
            let stats = aggregate(&teams);
            let members: usize = teams.iter().map(|t| t.len()).sum();
            assert_eq!(stats.team_count, teams.len());
            assert_eq!(stats.total_members, members);
            assert_eq!(stats.personality_distribution.values().sum::<usize>(), members);
            assert_eq!(stats.role_distribution.values().sum::<usize>(), members);
            assert_eq!(stats.activity_distribution.values().sum::<usize>(), members);
        }
    }
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[test]
fn nine_people_three_leaders_make_three_balanced_teams() {
    let mut pool = Vec::new();
    for i in 0..9 {
        let score = if i % 3 == 2 { 95 } else { 60 };
        pool.push(person(i, score, GAMES[i], Role::ALL[i % 5], 5));
    }
    validate(&pool, 3).unwrap();
    let teams = Balanced.partition(&pool, 3);
    assert_eq!(teams.len(), 3);
    for team in &teams {
        assert_eq!(team.len(), 3);
        assert_eq!(team.leader_count(), 1);
    }
}

#[test]
fn five_versus_two_participants_for_teams_of_three() {
    let mut pool: Vec<Person> = (0..5)
        .map(|i| person(i, if i == 0 { 95 } else { 60 }, GAMES[i], Role::Attacker, 5))
        .collect();
    assert!(validate(&pool, 3).is_ok());

    pool.truncate(2);
    assert_eq!(
        validate(&pool, 3).unwrap_err().reason(),
        "Need at least 3 participants. Available: 2"
    );
}
