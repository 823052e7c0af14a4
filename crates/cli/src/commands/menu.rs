//! `teamup menu` — The interactive session.
//!
//! A loop over seven actions sharing one roster and one formation service.
//! Every failure inside an action is reported and the loop carries on; only
//! I/O errors on the terminal itself end the session early. On exit the
//! roster is merged into the roster file and the service is shut down.
//!
//! Events from the roster and the service go through an [`EventBus`]; a
//! subscriber task forwards them to `tracing` and tallies them for the
//! closing summary.

use super::{load, report, survey};
use crate::prompt::Prompter;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use teamup_config::AppConfig;
use teamup_core::{EventBus, EventSink, FormationEvent, TracingSink};
use teamup_formation::{unassigned, FormationService, ShutdownOutcome, StrategyKind};
use teamup_roster::{export_teams, validate, Roster};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

const MENU: [&str; 7] = [
    "Conduct Participant Survey",
    "Load Participants from CSV",
    "View All Participants",
    "Form Teams",
    "View Formed Teams",
    "Export Teams to CSV",
    "Exit",
];

const DEFAULT_EXPORT_FILE: &str = "formed_teams.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Survey,
    LoadCsv,
    ViewParticipants,
    FormTeams,
    ViewTeams,
    Export,
    Exit,
}

impl Action {
    fn from_choice(choice: i64) -> Option<Self> {
        Some(match choice {
            1 => Self::Survey,
            2 => Self::LoadCsv,
            3 => Self::ViewParticipants,
            4 => Self::FormTeams,
            5 => Self::ViewTeams,
            6 => Self::Export,
            7 => Self::Exit,
            _ => return None,
        })
    }
}

/// Counts of what happened during a session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionTally {
    pub participants_added: usize,
    pub duplicates_rejected: usize,
    pub rows_skipped: usize,
    pub runs_completed: usize,
    pub runs_rejected: usize,
    /// Events lost because the subscriber fell behind
    pub missed: u64,
}

impl SessionTally {
    fn record(&mut self, event: &FormationEvent) {
        match event {
            FormationEvent::ParticipantAdded { .. } => self.participants_added += 1,
            FormationEvent::DuplicateRejected { .. } => self.duplicates_rejected += 1,
            FormationEvent::RowSkipped { .. } => self.rows_skipped += 1,
            FormationEvent::RunCompleted { .. } => self.runs_completed += 1,
            FormationEvent::ValidationFailed { .. } => self.runs_rejected += 1,
            _ => {}
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Session: {} participants added, {} duplicates rejected, {} rows skipped, {} team formations ({} rejected)",
            self.participants_added,
            self.duplicates_rejected,
            self.rows_skipped,
            self.runs_completed,
            self.runs_rejected
        )
    }
}

pub struct Session<'a, R, W> {
    config: &'a AppConfig,
    prompt: Prompter<R, W>,
    roster: Roster,
    service: FormationService,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(config: &'a AppConfig, prompt: Prompter<R, W>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            config,
            prompt,
            roster: Roster::with_sink(Arc::clone(&sink)),
            service: FormationService::new(sink),
        }
    }

    /// Load the roster file (or the sample) when auto-load is on.
    pub fn auto_load(&mut self) -> io::Result<()> {
        if !self.config.data.auto_load {
            return Ok(());
        }
        let data = &self.config.data;
        match self.roster.auto_load(&data.roster_file, &data.sample_file) {
            Ok(summary) => writeln!(self.prompt.out(), "{}", load::describe(&summary)),
            Err(e) => {
                warn!(error = %e, "Automatic load failed");
                writeln!(self.prompt.out(), "⚠️  No participants loaded: {e}")
            }
        }
    }

    /// Run the menu loop until Exit or end of input, then wrap up.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt.number("Enter your choice: ", 1, MENU.len() as i64)?
            else {
                break;
            };
            let Some(action) = Action::from_choice(choice) else {
                continue;
            };
            match action {
                Action::Survey => self.survey()?,
                Action::LoadCsv => self.load_csv()?,
                Action::ViewParticipants => self.view_participants()?,
                Action::FormTeams => self.form_teams()?,
                Action::ViewTeams => self.view_teams()?,
                Action::Export => self.export()?,
                Action::Exit => break,
            }
        }
        self.finish().await
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let out = self.prompt.out();
        writeln!(out, "\n==============================")?;
        writeln!(out, "MAIN MENU")?;
        writeln!(out, "==============================")?;
        for (i, label) in MENU.iter().enumerate() {
            writeln!(out, "{}. {label}", i + 1)?;
        }
        Ok(())
    }

    fn survey(&mut self) -> io::Result<()> {
        let Some(person) = survey::conduct(&mut self.prompt, &self.roster)? else {
            return Ok(());
        };
        let label = format!("{} ({})", person.name, person.id);
        match self.roster.add(person) {
            Ok(()) => writeln!(self.prompt.out(), "\n✅ Participant added: {label}"),
            Err(e) => writeln!(self.prompt.out(), "\n❌ {e}"),
        }
    }

    fn load_csv(&mut self) -> io::Result<()> {
        let Some(path) = self.prompt.line("Enter CSV file path: ")? else {
            return Ok(());
        };
        if let Err(e) = validate::csv_path(&path) {
            return writeln!(self.prompt.out(), "❌ {e}");
        }
        match self.roster.load_csv(Path::new(&path)) {
            Ok(summary) => writeln!(self.prompt.out(), "✅ {}", load::describe(&summary)),
            Err(e) => writeln!(self.prompt.out(), "❌ {e}"),
        }
    }

    fn view_participants(&mut self) -> io::Result<()> {
        if self.roster.is_empty() {
            return writeln!(self.prompt.out(), "No participants loaded yet.");
        }
        write!(self.prompt.out(), "{}", report::participants(self.roster.persons()))
    }

    fn form_teams(&mut self) -> io::Result<()> {
        let formation = &self.config.formation;
        let default_size = formation.default_team_size as i64;
        let Some(team_size) = self.prompt.number_or(
            &format!("Enter team size (default {default_size}): "),
            1,
            i64::from(u16::MAX),
            default_size,
        )?
        else {
            return Ok(());
        };

        let default_kind = formation.strategy().unwrap_or(StrategyKind::Balanced);
        writeln!(self.prompt.out(), "\nStrategies:")?;
        for (i, kind) in StrategyKind::ALL.iter().enumerate() {
            writeln!(self.prompt.out(), "  {}. {kind}", i + 1)?;
        }
        let default_pick = StrategyKind::ALL
            .iter()
            .position(|k| *k == default_kind)
            .unwrap_or(0) as i64
            + 1;
        let Some(pick) = self.prompt.number_or(
            &format!("Choose strategy (default {default_pick}): "),
            1,
            StrategyKind::ALL.len() as i64,
            default_pick,
        )?
        else {
            return Ok(());
        };
        let kind = StrategyKind::ALL[pick as usize - 1];

        let team_size = team_size as usize;
        match self.service.form(kind, self.roster.persons(), team_size) {
            Ok(teams) => {
                let left_out = unassigned(self.roster.persons(), &teams);
                let out = self.prompt.out();
                writeln!(out, "\n✅ Formed {} teams of {team_size} ({kind})\n", teams.len())?;
                write!(out, "{}", report::teams(&teams))?;
                writeln!(out)?;
                write!(out, "{}", report::statistics(&self.service.statistics()))?;
                write!(out, "{}", report::unassigned(&left_out))
            }
            Err(e) => writeln!(self.prompt.out(), "❌ Cannot form teams: {e}"),
        }
    }

    fn view_teams(&mut self) -> io::Result<()> {
        if !self.service.has_formed_teams() {
            return writeln!(self.prompt.out(), "No teams formed yet. Form teams first (option 4).");
        }
        let teams = self.service.formed_teams();
        let out = self.prompt.out();
        write!(out, "{}", report::teams(&teams))?;
        writeln!(out)?;
        write!(out, "{}", report::statistics(&self.service.statistics()))
    }

    fn export(&mut self) -> io::Result<()> {
        if !self.service.has_formed_teams() {
            return writeln!(self.prompt.out(), "No teams formed yet. Form teams first (option 4).");
        }
        let Some(answer) = self
            .prompt
            .line(&format!("Enter file name (default {DEFAULT_EXPORT_FILE}): "))?
        else {
            return Ok(());
        };
        let file_name = if answer.is_empty() { DEFAULT_EXPORT_FILE } else { answer.as_str() };
        if let Err(e) = validate::csv_path(file_name) {
            return writeln!(self.prompt.out(), "❌ {e}");
        }
        let path = self.config.data.export_path(file_name);
        match export_teams(&path, &self.service.formed_teams()) {
            Ok(()) => writeln!(self.prompt.out(), "✅ Teams exported to {}", path.display()),
            Err(e) => writeln!(self.prompt.out(), "❌ {e}"),
        }
    }

    async fn finish(&mut self) -> io::Result<()> {
        let roster_file = &self.config.data.roster_file;
        if !self.roster.is_empty() {
            match self.roster.save_merged(roster_file) {
                Ok(total) => writeln!(
                    self.prompt.out(),
                    "\n💾 Saved {total} participants to {}",
                    roster_file.display()
                )?,
                Err(e) => writeln!(self.prompt.out(), "\n❌ Could not save roster: {e}")?,
            }
        }

        match self.service.shutdown(self.config.formation.shutdown_grace()).await {
            ShutdownOutcome::Drained => info!("Formation service stopped"),
            ShutdownOutcome::Abandoned(n) => warn!(abandoned = n, "Formation service stopped with jobs still running"),
        }
        writeln!(self.prompt.out(), "Thank you for using TeamUp!")
    }
}

/// Run a full session over `prompt` and return what happened.
pub async fn run_session<R: BufRead, W: Write>(
    config: &AppConfig,
    prompt: Prompter<R, W>,
) -> io::Result<SessionTally> {
    let bus = Arc::new(EventBus::default());
    let mut events = bus.subscribe();
    let subscriber = tokio::spawn(async move {
        let mut tally = SessionTally::default();
        loop {
            match events.recv().await {
                Ok(event) => {
                    tally.record(&event);
                    TracingSink.emit(event.as_ref().clone());
                }
                Err(RecvError::Lagged(n)) => tally.missed += n,
                Err(RecvError::Closed) => break,
            }
        }
        tally
    });

    let mut session = Session::new(config, prompt, bus);
    session.auto_load()?;
    session.run().await?;
    drop(session);

    subscriber
        .await
        .map_err(|e| io::Error::other(format!("event subscriber failed: {e}")))
}

pub async fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let prompt = Prompter::new(stdin.lock(), io::stdout());
    let tally = run_session(config, prompt).await?;
    println!("{}", tally.summary());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::onboard::SAMPLE_PARTICIPANTS;
    use std::io::Cursor;

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.rebase(dir.path());
        std::fs::write(&config.data.sample_file, SAMPLE_PARTICIPANTS).unwrap();
        config
    }

    fn session<'a>(
        config: &'a AppConfig,
        script: &str,
    ) -> Session<'a, Cursor<Vec<u8>>, Vec<u8>> {
        let prompt = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        Session::new(config, prompt, Arc::new(teamup_core::NullSink))
    }

    fn output(session: &mut Session<'_, Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(session.prompt.out())).unwrap()
    }

    #[test]
    fn menu_choices_map_to_actions() {
        assert_eq!(Action::from_choice(1), Some(Action::Survey));
        assert_eq!(Action::from_choice(7), Some(Action::Exit));
        assert_eq!(Action::from_choice(8), None);
    }

    #[tokio::test]
    async fn formation_error_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        // form with size 2 (rejected), view (nothing yet), form with defaults,
        // export to the default file, exit
        let script = "4\n2\n\n5\n4\n\n\n6\n\n7\n";
        let mut s = session(&config, script);
        s.auto_load().unwrap();
        s.run().await.unwrap();
        let out = output(&mut s);

        assert!(out.contains("Loaded 30 participants"));
        assert!(out.contains("Cannot form teams: Team size must be at least 3"));
        assert!(out.contains("No teams formed yet"));
        assert!(out.contains("Formed 6 teams of 5 (balanced)"));
        assert!(out.contains("Thank you for using TeamUp!"));

        let exported = std::fs::read_to_string(config.data.export_path(DEFAULT_EXPORT_FILE)).unwrap();
        assert_eq!(exported.lines().count(), 31);

        let saved = teamup_roster::import_participants(&config.data.roster_file).unwrap();
        assert_eq!(saved.persons.len(), 30);
    }

    #[tokio::test]
    async fn insufficient_leaders_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        // 30 participants, 7 leaders: teams of 3 need 10
        let mut s = session(&config, "4\n3\n1\n7\n");
        s.auto_load().unwrap();
        s.run().await.unwrap();
        assert!(output(&mut s).contains("Insufficient leaders. Need at least 10 leaders, have 7"));
    }

    #[tokio::test]
    async fn survey_then_view_participants() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        config.data.auto_load = false;
        let script = "1\nAda Lovelace\n21\nada@uni.edu\n5\n5\n5\n5\n5\n5\n1\n9\n3\n7\n";
        let mut s = session(&config, script);
        s.auto_load().unwrap();
        s.run().await.unwrap();
        let out = output(&mut s);

        assert!(out.contains("Participant added: Ada Lovelace (P001)"));
        assert!(out.contains("Participants (1)"));
        assert_eq!(s.roster().len(), 1);
        assert!(config.data.roster_file.is_file());
    }

    #[tokio::test]
    async fn load_rejects_non_csv_and_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        config.data.auto_load = false;
        let script = "2\npeople.txt\n2\nmissing.csv\n3\n";
        let mut s = session(&config, script);
        s.run().await.unwrap();
        let out = output(&mut s);

        assert!(out.contains("File must be a CSV file (.csv extension)"));
        assert!(out.contains("File not found: missing.csv"));
        assert!(out.contains("No participants loaded yet."));
        // end of input exits without writing an empty roster
        assert!(!config.data.roster_file.exists());
    }

    #[tokio::test]
    async fn session_tally_counts_events() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let prompt = Prompter::new(Cursor::new(b"4\n2\n\n4\n\n\n7\n".to_vec()), Vec::new());
        let tally = run_session(&config, prompt).await.unwrap();

        assert_eq!(tally.participants_added, 30);
        assert_eq!(tally.runs_rejected, 1);
        assert_eq!(tally.runs_completed, 1);
        assert_eq!(tally.missed, 0);
        assert!(tally.summary().starts_with("Session: 30 participants added"));
    }
}
