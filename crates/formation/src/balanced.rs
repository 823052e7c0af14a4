//! Balanced strategy: activity diversity per team, a leader seed, and the
//! leader cap.
//!
//! Teams are built one at a time from the participants not yet assigned.
//! Assignment state is an index-based marker set over the pool, so the
//! caller's slice is never mutated and no identity-based removal happens.

use crate::strategy::{planned_teams, Partitioner, StrategyKind, ACTIVITY_CAP, LEADER_CAP};
use std::collections::HashMap;
use teamup_core::{Person, Team};

#[derive(Debug, Default, Clone, Copy)]
pub struct Balanced;

impl Partitioner for Balanced {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Balanced
    }

    fn partition(&self, pool: &[Person], team_size: usize) -> Vec<Team> {
        let mut assigned = vec![false; pool.len()];
        let mut teams = Vec::new();

        for mut team in planned_teams(pool.len(), team_size) {
            for idx in select_members(pool, &assigned, team_size) {
                if team.add_member(pool[idx].clone()).is_ok() {
                    assigned[idx] = true;
                }
            }
            if !team.is_empty() {
                teams.push(team);
            }
        }

        teams
    }
}

/// Pick up to `team_size` pool indices for one team.
///
/// 1. Seed with the first unassigned Leader, if any.
/// 2. Primary pass in pool order: accept while fewer than [`ACTIVITY_CAP`]
///    selected members share the candidate's activity.
/// 3. Backfill pass in pool order: fill the remaining slots regardless of
///    activity.
///
/// Both passes skip Leaders once [`LEADER_CAP`] are selected.
fn select_members(pool: &[Person], assigned: &[bool], team_size: usize) -> Vec<usize> {
    let available = || (0..pool.len()).filter(|&i| !assigned[i]);

    let mut selected: Vec<usize> = Vec::with_capacity(team_size);
    let mut activity_count: HashMap<&str, usize> = HashMap::new();
    let mut leaders = 0;

    if let Some(seed) = available().find(|&i| pool[i].is_leader()) {
        selected.push(seed);
        leaders += 1;
        activity_count.insert(pool[seed].preferred_activity.as_str(), 1);
    }

    for idx in available() {
        if selected.len() >= team_size {
            break;
        }
        if selected.contains(&idx) {
            continue;
        }
        let candidate = &pool[idx];
        if candidate.is_leader() && leaders >= LEADER_CAP {
            continue;
        }
        let count = activity_count
            .entry(candidate.preferred_activity.as_str())
            .or_insert(0);
        if *count < ACTIVITY_CAP {
            *count += 1;
            selected.push(idx);
            if candidate.is_leader() {
                leaders += 1;
            }
        }
    }

    for idx in available() {
        if selected.len() >= team_size {
            break;
        }
        if selected.contains(&idx) {
            continue;
        }
        if pool[idx].is_leader() {
            if leaders >= LEADER_CAP {
                continue;
            }
            leaders += 1;
        }
        selected.push(idx);
    }

    selected
}
