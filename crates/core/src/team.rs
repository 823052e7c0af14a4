//! Teams: bounded-capacity containers of participants.
//!
//! A team is created empty with a fixed capacity at the start of a
//! partitioning run, mutated only by the strategy that owns the run, and
//! read-only afterwards. Metrics are computed on demand, never stored.

use crate::error::TeamError;
use crate::person::{Person, PersonalityType, Role};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: String,

    /// Display name, `"Team <id>"` unless renamed
    pub name: String,

    members: Vec<Person>,

    capacity: usize,
}

impl Team {
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        let id = id.into();
        Self {
            name: format!("Team {id}"),
            id,
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a member. Fails when the team is full or the person (by id) is
    /// already a member; the team is left unchanged on failure.
    pub fn add_member(&mut self, person: Person) -> Result<(), TeamError> {
        if self.is_full() {
            return Err(TeamError::Full {
                team_id: self.id.clone(),
                capacity: self.capacity,
            });
        }
        if self.members.iter().any(|m| m.id == person.id) {
            return Err(TeamError::DuplicateMember {
                team_id: self.id.clone(),
                person_id: person.id,
            });
        }
        self.members.push(person);
        Ok(())
    }

    pub fn members(&self) -> &[Person] {
        &self.members
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    pub fn leader_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_leader()).count()
    }

    pub fn contains(&self, person_id: &str) -> bool {
        self.members.iter().any(|m| m.id == person_id)
    }

    /// Number of distinct preferred activities among members.
    pub fn diversity_score(&self) -> usize {
        self.activities().len()
    }

    /// Distinct personality types present, in first-seen order.
    pub fn personality_types(&self) -> Vec<PersonalityType> {
        distinct(self.members.iter().map(|m| m.personality_type()))
    }

    /// Distinct roles present, in first-seen order.
    pub fn roles(&self) -> Vec<Role> {
        distinct(self.members.iter().map(|m| m.preferred_role))
    }

    /// Distinct activities present, in first-seen order.
    pub fn activities(&self) -> Vec<&str> {
        distinct(self.members.iter().map(|m| m.preferred_activity.as_str()))
    }

    /// Mean skill level, 0.0 for an empty team.
    pub fn average_skill(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let total: u32 = self.members.iter().map(|m| u32::from(m.skill_level)).sum();
        f64::from(total) / self.members.len() as f64
    }
}

fn distinct<T: PartialEq>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}/{})", self.name, self.members.len(), self.capacity)?;
        for m in &self.members {
            writeln!(f, "  - {m}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str, score: u8, game: &str, role: Role, skill: u8) -> Person {
        Person::new(id, format!("Name {id}"), 20, format!("{id}@example.com"), score, game, role, skill)
    }

    #[test]
    fn new_team_is_empty_with_default_name() {
        let team = Team::new("T1", 4);
        assert_eq!(team.name, "Team T1");
        assert!(team.is_empty());
        assert_eq!(team.average_skill(), 0.0);
        assert_eq!(team.diversity_score(), 0);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut team = Team::new("T1", 3);
        for i in 0..3 {
            team.add_member(p(&format!("P{i}"), 60, "Chess", Role::Attacker, 5)).unwrap();
        }
        assert!(team.is_full());
        let err = team.add_member(p("P9", 60, "Chess", Role::Attacker, 5)).unwrap_err();
        assert!(matches!(err, TeamError::Full { capacity: 3, .. }));
        assert_eq!(team.len(), 3);
    }

    #[test]
    fn duplicate_member_rejected() {
        let mut team = Team::new("T1", 5);
        team.add_member(p("P1", 60, "Chess", Role::Attacker, 5)).unwrap();
        let err = team.add_member(p("P1", 60, "Chess", Role::Attacker, 5)).unwrap_err();
        assert!(matches!(err, TeamError::DuplicateMember { .. }));
        assert_eq!(team.len(), 1);
    }

    #[test]
    fn derived_metrics() {
        let mut team = Team::new("T1", 5);
        team.add_member(p("P1", 95, "Chess", Role::Strategist, 9)).unwrap();
        team.add_member(p("P2", 60, "FIFA", Role::Attacker, 4)).unwrap();
        team.add_member(p("P3", 75, "Chess", Role::Attacker, 5)).unwrap();

        assert_eq!(team.diversity_score(), 2);
        assert_eq!(team.activities(), vec!["Chess", "FIFA"]);
        assert_eq!(team.roles(), vec![Role::Strategist, Role::Attacker]);
        assert_eq!(
            team.personality_types(),
            vec![PersonalityType::Leader, PersonalityType::Thinker, PersonalityType::Balanced]
        );
        assert_eq!(team.leader_count(), 1);
        assert!((team.average_skill() - 6.0).abs() < f64::EPSILON);
        assert!(team.contains("P2"));
    }

    #[test]
    fn display_lists_members() {
        let mut team = Team::new("T2", 3);
        team.add_member(p("P1", 95, "Chess", Role::Strategist, 9)).unwrap();
        let s = team.to_string();
        assert!(s.starts_with("Team T2 (1/3)"));
        assert!(s.contains("Name P1 (Leader, Strategist, Chess)"));
    }
}
