//! Formation service — validation, event reporting and the worker pool.
//!
//! [`FormationService`] is what callers hold. It validates a pool before any
//! strategy touches it (all-or-nothing), remembers the last formed teams for
//! viewing and export, and reports what happened through the injected
//! [`EventSink`]. The strategies themselves stay pure.

use crate::stats::{aggregate, unassigned, TeamStatistics};
use crate::strategy::StrategyKind;
use crate::validator::{number_of_teams, validate};
use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use teamup_core::{EventSink, FormationError, FormationEvent, Person, Team};
use tokio::sync::Semaphore;
use tokio::sync::watch;

/// Default wait for in-flight work on shutdown before running jobs are abandoned.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("worker pool is shut down")]
    ShutDown,

    #[error("worker pool shut down before the job finished; its result was discarded")]
    Abandoned,

    #[error("worker task failed: {0}")]
    TaskFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Formation(#[from] FormationError),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// How a [`WorkerPool::shutdown`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight job finished within the grace period
    Drained,
    /// The grace period ran out with this many jobs still running. Their
    /// callers were released with [`PoolError::Abandoned`]; the blocking
    /// threads run to completion in the background and their results are
    /// dropped.
    Abandoned(usize),
}

/// A bounded pool of blocking workers.
///
/// At most `size` jobs run at once, each on tokio's blocking thread pool.
/// After [`shutdown`](Self::shutdown) no new work is accepted. A job that is
/// already running cannot be interrupted, so a shutdown that runs out of
/// grace stops waiting for it instead.
pub struct WorkerPool {
    size: usize,
    permits: Arc<Semaphore>,
    accepting: AtomicBool,
    abandon: watch::Sender<bool>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let (abandon, _) = watch::channel(false);
        Self {
            size,
            permits: Arc::new(Semaphore::new(size)),
            accepting: AtomicBool::new(true),
            abandon,
        }
    }

    /// One worker per available CPU.
    pub fn with_available_parallelism() -> Self {
        let size = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting.load(Ordering::SeqCst)
    }

    /// Run `job` on a worker and wait for its result.
    pub async fn run<F, T>(&self, job: F) -> Result<T, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        if !self.is_accepting() {
            return Err(PoolError::ShutDown);
        }
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| PoolError::ShutDown)?;

        let mut abandoned = self.abandon.subscribe();
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        });

        tokio::select! {
            joined = handle => joined.map_err(|e| PoolError::TaskFailed(e.to_string())),
            _ = abandoned.wait_for(|gone| *gone) => Err(PoolError::Abandoned),
        }
    }

    /// Stop accepting work and wait up to `grace` for running jobs. Callers
    /// of jobs still running after that are released with
    /// [`PoolError::Abandoned`].
    pub async fn shutdown(&self, grace: Duration) -> ShutdownOutcome {
        self.accepting.store(false, Ordering::SeqCst);
        if self.permits.is_closed() {
            return ShutdownOutcome::Drained;
        }

        let all = u32::try_from(self.size).unwrap_or(u32::MAX);
        let drained = tokio::time::timeout(grace, self.permits.acquire_many(all))
            .await
            .map(|permit| permit.is_ok())
            .unwrap_or(false);
        // a job holds its permit until it returns
        let still_running = if drained {
            0
        } else {
            self.size - self.permits.available_permits().min(self.size)
        };
        self.permits.close();

        if still_running == 0 {
            tracing::debug!(workers = self.size, "Worker pool drained");
            return ShutdownOutcome::Drained;
        }

        self.abandon.send_replace(true);
        tracing::warn!(
            still_running,
            grace_secs = grace.as_secs(),
            "Worker pool did not drain in time, abandoning running jobs"
        );
        ShutdownOutcome::Abandoned(still_running)
    }
}

/// Result of one strategy in [`FormationService::compare`].
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub strategy: StrategyKind,
    pub teams: Vec<Team>,
    pub statistics: TeamStatistics,
    pub unassigned: usize,
}

pub struct FormationService {
    sink: Arc<dyn EventSink>,
    formed: Vec<Team>,
    pool: WorkerPool,
}

impl FormationService {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_pool(sink, WorkerPool::with_available_parallelism())
    }

    pub fn with_pool(sink: Arc<dyn EventSink>, pool: WorkerPool) -> Self {
        Self {
            sink,
            formed: Vec::new(),
            pool,
        }
    }

    /// Validate, then partition `participants` with `kind`.
    ///
    /// On validation failure nothing is partitioned and the previously formed
    /// teams are kept.
    pub fn form(
        &mut self,
        kind: StrategyKind,
        participants: &[Person],
        team_size: usize,
    ) -> Result<Vec<Team>, FormationError> {
        if let Err(e) = validate(participants, team_size) {
            self.sink.emit(FormationEvent::ValidationFailed {
                reason: e.reason(),
                timestamp: Utc::now(),
            });
            return Err(e);
        }

        self.sink.emit(FormationEvent::RunStarted {
            strategy: kind.to_string(),
            team_size,
            teams_planned: number_of_teams(participants.len(), team_size),
            pool_size: participants.len(),
            timestamp: Utc::now(),
        });

        let teams = kind.partitioner().partition(participants, team_size);
        self.report_run(kind, participants, &teams);

        self.formed = teams.clone();
        Ok(teams)
    }

    /// The teams from the last successful [`form`](Self::form).
    pub fn formed_teams(&self) -> Vec<Team> {
        self.formed.clone()
    }

    pub fn has_formed_teams(&self) -> bool {
        !self.formed.is_empty()
    }

    /// Statistics for the last formed teams.
    pub fn statistics(&self) -> TeamStatistics {
        aggregate(&self.formed)
    }

    /// Run every strategy over the same pool concurrently on the worker pool.
    ///
    /// Validation runs once up front. Reports come back in
    /// [`StrategyKind::ALL`] order. The formed-teams state is not touched.
    pub async fn compare(
        &self,
        participants: &[Person],
        team_size: usize,
    ) -> Result<Vec<StrategyReport>, ServiceError> {
        validate(participants, team_size)?;

        let shared: Arc<Vec<Person>> = Arc::new(participants.to_vec());
        let run = |kind: StrategyKind| {
            let pool = Arc::clone(&shared);
            self.pool.run(move || {
                let teams = kind.partitioner().partition(&pool, team_size);
                let statistics = aggregate(&teams);
                let unassigned = unassigned(&pool, &teams).len();
                StrategyReport {
                    strategy: kind,
                    teams,
                    statistics,
                    unassigned,
                }
            })
        };

        let (balanced, skill, role) = tokio::join!(
            run(StrategyKind::Balanced),
            run(StrategyKind::SkillBased),
            run(StrategyKind::RoleBased),
        );
        Ok(vec![balanced?, skill?, role?])
    }

    /// Release the worker pool. Safe to call more than once.
    pub async fn shutdown(&self, grace: Duration) -> ShutdownOutcome {
        self.pool.shutdown(grace).await
    }

    fn report_run(&self, kind: StrategyKind, participants: &[Person], teams: &[Team]) {
        for team in teams {
            self.sink.emit(FormationEvent::TeamFormed {
                team_id: team.id.clone(),
                size: team.len(),
                leaders: team.leader_count(),
                diversity: team.diversity_score(),
                timestamp: Utc::now(),
            });
        }

        let left_out = unassigned(participants, teams);
        for person in &left_out {
            let reason = if person.is_leader() {
                "no team with room under the leader cap"
            } else {
                "no open team slot"
            };
            self.sink.emit(FormationEvent::CandidateDropped {
                person_id: person.id.clone(),
                reason: reason.into(),
                timestamp: Utc::now(),
            });
        }

        self.sink.emit(FormationEvent::RunCompleted {
            strategy: kind.to_string(),
            teams_formed: teams.len(),
            assigned: participants.len() - left_out.len(),
            unassigned: left_out.len(),
            timestamp: Utc::now(),
        });
    }
}
