//! # TeamUp Core
//!
//! Domain types, error definitions and the formation event seam for the
//! TeamUp team-formation engine. This crate has no I/O of its own: it defines
//! the model that the formation, roster and CLI crates implement against.
//!
//! ## Layout
//!
//! - [`person`]: survey-profiled participants and their derived personality type
//! - [`team`]: bounded-capacity teams and their derived metrics
//! - [`error`]: the `thiserror` error hierarchy
//! - [`event`]: formation events and the [`EventSink`] reporting interface

pub mod error;
pub mod event;
pub mod person;
pub mod team;

// Re-export key types at crate root for ergonomics
pub use error::{Error, FormationError, Result, RosterError, TeamError};
pub use event::{EventBus, EventSink, FormationEvent, NullSink, RecordingSink, TracingSink};
pub use person::{Person, PersonalityType, Role};
pub use team::Team;
