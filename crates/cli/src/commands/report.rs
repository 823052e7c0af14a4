//! Plain-text rendering of participants, teams and statistics.

use std::collections::BTreeMap;
use std::fmt::{Display, Write};
use teamup_core::{Person, Team};
use teamup_formation::{StrategyReport, TeamStatistics};

pub fn participants(persons: &[Person]) -> String {
    let mut out = format!("Participants ({})\n", persons.len());
    for p in persons {
        let _ = writeln!(
            out,
            "  {:<6} {:<24} {:<28} {:<12} {:<11} skill {:>2}  score {:>3} {}",
            p.id,
            p.name,
            p.email,
            p.preferred_activity,
            p.preferred_role.as_str(),
            p.skill_level,
            p.personality_score(),
            p.personality_type(),
        );
    }
    out
}

pub fn teams(teams: &[Team]) -> String {
    let mut out = String::new();
    for team in teams {
        let _ = writeln!(
            out,
            "{} ({}/{})  leaders {}  diversity {}  avg skill {:.2}",
            team.name,
            team.len(),
            team.capacity(),
            team.leader_count(),
            team.diversity_score(),
            team.average_skill()
        );
        for m in team.members() {
            let _ = writeln!(out, "  - {m} [{}]", m.id);
        }
    }
    out
}

pub fn statistics(stats: &TeamStatistics) -> String {
    let mut out = String::from("Statistics\n");
    let _ = writeln!(out, "  Teams:            {}", stats.team_count);
    let _ = writeln!(out, "  Members placed:   {}", stats.total_members);
    let _ = writeln!(out, "  Avg team size:    {:.2}", stats.average_team_size);
    let _ = writeln!(out, "  Avg skill:        {:.2}", stats.average_skill);
    let _ = writeln!(out, "  Avg diversity:    {:.2}", stats.average_diversity);
    let _ = writeln!(out, "  Personalities:    {}", distribution(&stats.personality_distribution));
    let _ = writeln!(out, "  Roles:            {}", distribution(&stats.role_distribution));
    let _ = writeln!(out, "  Activities:       {}", distribution(&stats.activity_distribution));
    out
}

pub fn unassigned(persons: &[&Person]) -> String {
    if persons.is_empty() {
        return String::new();
    }
    let mut out = format!("Unassigned ({})\n", persons.len());
    for p in persons {
        let _ = writeln!(out, "  - {} [{}]", p, p.id);
    }
    out
}

/// Side-by-side table of one report per strategy.
pub fn comparison(reports: &[StrategyReport]) -> String {
    let mut out = format!(
        "{:<12} {:>6} {:>8} {:>10} {:>10} {:>10} {:>11}\n",
        "Strategy", "Teams", "Placed", "Unplaced", "Avg size", "Avg skill", "Avg divers."
    );
    for r in reports {
        let s = &r.statistics;
        let _ = writeln!(
            out,
            "{:<12} {:>6} {:>8} {:>10} {:>10.2} {:>10.2} {:>11.2}",
            r.strategy.as_str(),
            s.team_count,
            s.total_members,
            r.unassigned,
            s.average_team_size,
            s.average_skill,
            s.average_diversity
        );
    }
    out
}

fn distribution<K: Display>(counts: &BTreeMap<K, usize>) -> String {
    if counts.is_empty() {
        return "-".into();
    }
    counts
        .iter()
        .map(|(k, n)| format!("{k} {n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamup_core::Role;
    use teamup_formation::aggregate;

    fn person(id: &str, score: u8, game: &str) -> Person {
        Person::new(id, format!("Name {id}"), 20, format!("{id}@uni.edu"), score, game, Role::Defender, 4)
    }

    #[test]
    fn statistics_lists_distributions() {
        let mut team = Team::new("T1", 3);
        team.add_member(person("P1", 95, "Chess")).unwrap();
        team.add_member(person("P2", 60, "FIFA")).unwrap();
        let text = statistics(&aggregate(&[team]));
        assert!(text.contains("Teams:            1"));
        assert!(text.contains("Personalities:    Leader 1, Thinker 1"));
        assert!(text.contains("Activities:       Chess 1, FIFA 1"));
    }

    #[test]
    fn empty_statistics_render_dashes() {
        let text = statistics(&TeamStatistics::default());
        assert!(text.contains("Roles:            -"));
    }

    #[test]
    fn unassigned_is_blank_when_everyone_placed() {
        assert!(unassigned(&[]).is_empty());
        let p = person("P9", 50, "Chess");
        assert!(unassigned(&[&p]).contains("[P9]"));
    }

    #[test]
    fn teams_list_header_and_members() {
        let mut team = Team::new("T2", 3);
        team.add_member(person("P1", 95, "Chess")).unwrap();
        let text = teams(&[team]);
        assert!(text.starts_with("Team T2 (1/3)"));
        assert!(text.contains("leaders 1"));
    }
}
