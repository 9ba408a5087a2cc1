//! Core domain logic for restbreak.
//!
//! This crate contains the fundamental types and logic for:
//! - Break policies: turning idle-time samples into busy/rest events
//! - Indicator state: the guarded nominal/warning/escalated transitions
//! - Idle sources: querying the host for time since last input
//! - Scheduling: the once-per-second tick that drives the policies

pub mod idle;
pub mod indicator;
mod policy;
pub mod scheduler;

pub use idle::{CommandIdleSource, IdleError, IdleTimeSource};
pub use indicator::{Indicator, IndicatorState};
pub use policy::{BreakKind, BreakPolicy, Observation, PolicyError, PolicyEvent, PolicySettings};
pub use scheduler::{EventHandler, Scheduler, TICK_INTERVAL, TickError};
