//! Tick scheduling.
//!
//! One tick queries the idle source once and feeds that sample to every
//! registered policy in registration order. Events raised by a policy are
//! handled before the next policy observes the sample.

use std::convert::Infallible;
use std::time::Duration;

use thiserror::Error;
use tokio::time::MissedTickBehavior;

use crate::idle::{IdleError, IdleTimeSource};
use crate::policy::{BreakPolicy, PolicyEvent};

/// Time between two ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Receives the events raised by policies.
pub trait EventHandler {
    type Error: std::error::Error + Send + Sync + 'static;

    fn handle(&mut self, event: PolicyEvent) -> Result<(), Self::Error>;
}

/// Errors that stop the scheduler.
#[derive(Debug, Error)]
pub enum TickError<E: std::error::Error + 'static> {
    /// The idle source failed.
    #[error("idle time query failed")]
    Idle(#[from] IdleError),
    /// The event handler failed.
    #[error("event handler failed")]
    Handler(#[source] E),
}

/// Drives a set of policies from one idle source.
pub struct Scheduler<S, H> {
    source: S,
    handler: H,
    policies: Vec<BreakPolicy>,
}

impl<S, H> Scheduler<S, H>
where
    S: IdleTimeSource,
    H: EventHandler,
{
    pub const fn new(source: S, handler: H) -> Self {
        Self {
            source,
            handler,
            policies: Vec::new(),
        }
    }

    /// Registers a policy. Policies observe samples in registration order.
    pub fn add_policy(&mut self, policy: BreakPolicy) {
        tracing::debug!(
            kind = %policy.kind(),
            max_busy_ticks = policy.max_busy_ticks(),
            break_idle_secs = policy.break_idle_secs(),
            "registered policy"
        );
        self.policies.push(policy);
    }

    pub fn policies(&self) -> &[BreakPolicy] {
        &self.policies
    }

    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// Runs one tick and returns the sample it observed.
    pub fn tick(&mut self) -> Result<u64, TickError<H::Error>> {
        let idle_ms = self.source.idle_ms()?;

        for policy in &mut self.policies {
            let observation = policy.observe(idle_ms);
            if observation.is_empty() {
                continue;
            }
            for event in observation.events() {
                tracing::debug!(?event, idle_ms, "policy event");
                self.handler.handle(event).map_err(TickError::Handler)?;
            }
        }

        Ok(idle_ms)
    }

    /// Ticks once per [`TICK_INTERVAL`] until a tick fails.
    ///
    /// The first tick runs immediately. A tick that overruns delays the
    /// following ones instead of bursting to catch up.
    pub async fn start(&mut self) -> Result<Infallible, TickError<H::Error>> {
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(policies = self.policies.len(), "scheduler started");
        loop {
            ticker.tick().await;
            self.tick()?;
        }
    }
}
