//! Team formation engine for TeamUp.
//!
//! Partitions a pool of participants into fixed-size teams under competing
//! constraints: personality balance, skill balance, role balance, activity
//! diversity and leader scarcity.
//!
//! # Pipeline
//!
//! ```text
//! pool + team size ──▶ validator ──▶ strategy ──▶ teams ──▶ statistics
//!                         │              │
//!                   InsufficientParticipants   Balanced | SkillBased | RoleBased
//! ```
//!
//! The strategies are synchronous, deterministic given input order, and never
//! log. [`FormationService`] wraps them with validation, event reporting and
//! a bounded worker pool used to compare strategies side by side.

mod balanced;
mod cursor;
mod role;
mod service;
mod skill;
mod stats;
mod strategy;
mod validator;

pub use balanced::Balanced;
pub use cursor::{RoundRobinCursor, SnakeCursor};
pub use role::RoleBased;
pub use service::{
    FormationService, PoolError, ServiceError, ShutdownOutcome, StrategyReport, WorkerPool,
    DEFAULT_SHUTDOWN_GRACE,
};
pub use skill::SkillBased;
pub use stats::{aggregate, unassigned, TeamStatistics};
pub use strategy::{Partitioner, StrategyKind, ACTIVITY_CAP, LEADER_CAP, MIN_TEAM_SIZE};
pub use validator::{number_of_teams, validate};
