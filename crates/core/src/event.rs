//! Formation events — the side channel through which the engine reports.
//!
//! Strategies are pure and never log. The services around them describe what
//! happened as [`FormationEvent`]s and hand them to an injected [`EventSink`].
//! The CLI decides whether those end up in `tracing`, in memory, or on a
//! broadcast bus.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// All events emitted by formation and roster operations.
#[derive(Debug, Clone, Serialize)]
pub enum FormationEvent {
    /// A strategy is about to run over a validated pool
    RunStarted {
        strategy: String,
        team_size: usize,
        teams_planned: usize,
        pool_size: usize,
        timestamp: DateTime<Utc>,
    },

    /// One team of a run is complete
    TeamFormed {
        team_id: String,
        size: usize,
        leaders: usize,
        diversity: usize,
        timestamp: DateTime<Utc>,
    },

    /// A candidate of the pool ended up in no team
    CandidateDropped {
        person_id: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// A strategy finished
    RunCompleted {
        strategy: String,
        teams_formed: usize,
        assigned: usize,
        unassigned: usize,
        timestamp: DateTime<Utc>,
    },

    /// The constraint validator rejected the input; nothing was partitioned
    ValidationFailed {
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// A participant joined the roster
    ParticipantAdded {
        person_id: String,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// A participant was refused because its email or id is already taken
    DuplicateRejected {
        person_id: String,
        email: String,
        /// `"email"` or `"id"`
        field: String,
        timestamp: DateTime<Utc>,
    },

    /// A CSV row was skipped during import
    RowSkipped {
        line: usize,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl FormationEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::RunStarted { timestamp, .. }
            | Self::TeamFormed { timestamp, .. }
            | Self::CandidateDropped { timestamp, .. }
            | Self::RunCompleted { timestamp, .. }
            | Self::ValidationFailed { timestamp, .. }
            | Self::ParticipantAdded { timestamp, .. }
            | Self::DuplicateRejected { timestamp, .. }
            | Self::RowSkipped { timestamp, .. } => *timestamp,
        }
    }
}

/// Receiver of formation events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: FormationEvent);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: FormationEvent) {}
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<FormationEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far.
    pub fn events(&self) -> Vec<FormationEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: FormationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Forwards events to `tracing` as structured records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: FormationEvent) {
        match event {
            FormationEvent::RunStarted { strategy, team_size, teams_planned, pool_size, .. } => {
                tracing::info!(%strategy, team_size, teams_planned, pool_size, "Forming teams");
            }
            FormationEvent::TeamFormed { team_id, size, leaders, diversity, .. } => {
                tracing::debug!(%team_id, size, leaders, diversity, "Team formed");
            }
            FormationEvent::CandidateDropped { person_id, reason, .. } => {
                tracing::warn!(%person_id, %reason, "Participant left unassigned");
            }
            FormationEvent::RunCompleted { strategy, teams_formed, assigned, unassigned, .. } => {
                tracing::info!(%strategy, teams_formed, assigned, unassigned, "Successfully formed teams");
            }
            FormationEvent::ValidationFailed { reason, .. } => {
                tracing::warn!(%reason, "Team formation rejected");
            }
            FormationEvent::ParticipantAdded { person_id, name, .. } => {
                tracing::debug!(%person_id, %name, "Participant added");
            }
            FormationEvent::DuplicateRejected { person_id, email, field, .. } => {
                tracing::info!(%person_id, %email, %field, "Duplicate participant rejected");
            }
            FormationEvent::RowSkipped { line, reason, .. } => {
                tracing::warn!(line, %reason, "Skipping invalid CSV row");
            }
        }
    }
}

/// A broadcast-based event bus for formation events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<FormationEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: FormationEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<FormationEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: FormationEvent) {
        self.publish(event);
    }
}
