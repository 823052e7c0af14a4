//! `teamup survey` — Interactive participant survey.

use crate::prompt::Prompter;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use teamup_config::AppConfig;
use teamup_core::{Person, PersonalityType, Role, TracingSink};
use teamup_roster::{save_merged, validate, Roster};
use tracing::{info, warn};

pub const QUESTIONS: [&str; 5] = [
    "I enjoy taking the lead and guiding others during group activities",
    "I prefer analyzing situations and coming up with strategic solutions",
    "I work well with others and enjoy collaborative teamwork",
    "I am calm under pressure and can help maintain team morale",
    "I like making quick decisions and adapting in dynamic situations",
];

pub const ACTIVITIES: [&str; 10] = [
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

/// Each 1–5 rating is worth this many points of the 0–100 score.
const POINTS_PER_RATING: u32 = 4;

/// Sum of the ratings scaled to 0–100.
pub fn personality_score(ratings: &[u8]) -> u8 {
    let total: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    (total * POINTS_PER_RATING).min(100) as u8
}

/// Walk one participant through the survey. Every answer is validated and
/// re-asked until it passes; an email already in `roster` is refused.
///
/// Returns `None` if the input ends before the survey is complete.
pub fn conduct<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    roster: &Roster,
) -> io::Result<Option<Person>> {
    writeln!(p.out(), "\n=== PARTICIPANT SURVEY ===")?;
    let id = roster.next_participant_id();

    let Some(name) = p.ask("Enter participant name: ", |a| {
        validate::name(a).map(|_| a.to_string()).map_err(|e| e.to_string())
    })?
    else {
        return Ok(None);
    };

    let Some(age) = p.ask("Enter age (16-100): ", |a| {
        validate::number("age", a)
            .and_then(validate::age)
            .map_err(|e| e.to_string())
    })?
    else {
        return Ok(None);
    };

    let Some(email) = p.ask("Enter email address: ", |a| {
        validate::email(a).map_err(|e| e.to_string())?;
        if roster.contains_email(a) {
            return Err(format!("Email already registered: {a}"));
        }
        Ok(a.to_string())
    })?
    else {
        return Ok(None);
    };

    writeln!(p.out(), "\nPERSONALITY ASSESSMENT")?;
    writeln!(p.out(), "Rate each statement (1=Strongly Disagree, 5=Strongly Agree)")?;
    let mut ratings = Vec::with_capacity(QUESTIONS.len());
    for (i, question) in QUESTIONS.iter().enumerate() {
        writeln!(p.out(), "\nQuestion {}: {question}", i + 1)?;
        let Some(rating) = p.number("Your rating (1-5): ", 1, 5)? else {
            return Ok(None);
        };
        ratings.push(rating as u8);
    }
    let score = personality_score(&ratings);
    writeln!(p.out(), "\nPersonality Score: {score}/100")?;
    writeln!(p.out(), "Personality Type: {}", PersonalityType::classify(score))?;

    let Some(activity) = p.choose("\nSelect your preferred game or sport:", &ACTIVITIES)? else {
        return Ok(None);
    };
    let role_names = Role::ALL.map(|r| r.as_str());
    let Some(role) = p.choose("\nSelect your preferred playing role:", &role_names)? else {
        return Ok(None);
    };
    let Some(skill) = p.number("Enter skill level (1-10): ", 1, 10)? else {
        return Ok(None);
    };

    info!(%id, %name, score, "Survey completed");
    Ok(Some(Person::new(
        id,
        name,
        age,
        email,
        score,
        ACTIVITIES[activity],
        Role::ALL[role],
        skill as u8,
    )))
}

pub async fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let roster_file = &config.data.roster_file;
    let mut roster = Roster::with_sink(Arc::new(TracingSink));
    if roster_file.is_file() {
        if let Err(e) = roster.load_csv(roster_file) {
            warn!(path = %roster_file.display(), error = %e, "Could not read roster");
        }
    }

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let Some(person) = conduct(&mut prompter, &roster)? else {
        println!("\nSurvey cancelled.");
        return Ok(());
    };

    println!("\n✅ {} registered as {}", person.name, person.id);
    let total = save_merged(roster_file, std::slice::from_ref(&person))?;
    println!("   Roster {} now holds {total} participants", roster_file.display());
    Ok(())
}
