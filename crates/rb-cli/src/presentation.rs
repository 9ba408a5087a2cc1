//! Presentation glue between break policies and the user.
//!
//! The [`Presenter`] owns the indicator and the rest log. It is the single
//! [`EventHandler`] of the scheduler:
//!
//! - a short break overdue asks for the warning indicator,
//! - a long break overdue asks for the escalated indicator,
//! - a rest from either policy notifies, logs the busy count and resets the
//!   indicator, but only when the indicator was not already nominal.
//!
//! Policies report on every tick, so everything here must tolerate repeated
//! events. Indicator changes are rendered once per change.

use std::io::{self, Write};
use std::process::Stdio;

use rb_core::{BreakKind, EventHandler, Indicator, IndicatorState, PolicyEvent};
use rb_log::{LogError, RestLog};
use thiserror::Error;

/// Display timeout hint for notifications.
pub const NOTIFICATION_TIMEOUT_MS: u64 = 5000;

/// Presentation errors. Both are fatal to the reminder loop.
#[derive(Debug, Error)]
pub enum PresentError {
    /// The rest log could not be written.
    #[error(transparent)]
    Log(#[from] LogError),
    /// The terminal could not be written.
    #[error("failed to write to terminal")]
    Render(#[from] io::Error),
}

/// A fire-and-forget message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub summary: &'static str,
    pub body: String,
    pub timeout_ms: u64,
}

impl Notification {
    /// The message shown when the user rests after `busy_ticks` of work.
    pub fn rested(busy_ticks: u64) -> Self {
        Self {
            summary: "busy",
            body: busy_ticks.to_string(),
            timeout_ms: NOTIFICATION_TIMEOUT_MS,
        }
    }
}

/// Where notifications go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notifier {
    /// Printed alongside the indicator.
    Terminal,
    /// Handed to a `notify-send` compatible program.
    Command(String),
}

impl Notifier {
    pub fn from_command(command: Option<String>) -> Self {
        command.map_or(Self::Terminal, Self::Command)
    }
}

/// Renders indicator changes and handles rests.
pub struct Presenter<W> {
    indicator: Indicator,
    log: RestLog,
    out: W,
    notifier: Notifier,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, log: RestLog, notifier: Notifier) -> Self {
        Self {
            indicator: Indicator::new(),
            log,
            out,
            notifier,
        }
    }

    pub const fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    /// Renders the current indicator state.
    pub fn show(&mut self) -> io::Result<()> {
        let state = self.indicator.state();
        writeln!(self.out, "indicator: {state} ({})", state.icon())?;
        self.out.flush()
    }

    fn rest(&mut self, busy_ticks: u64) -> Result<(), PresentError> {
        if self.indicator.state() == IndicatorState::Nominal {
            return Ok(());
        }

        self.notify(&Notification::rested(busy_ticks))?;
        self.log.append(busy_ticks)?;
        tracing::info!(busy_ticks, log = %self.log.path().display(), "rest recorded");
        if self.indicator.set_nominal() {
            self.show()?;
        }
        Ok(())
    }

    fn notify(&mut self, notification: &Notification) -> io::Result<()> {
        match &self.notifier {
            Notifier::Terminal => {
                writeln!(self.out, "{}: {}", notification.summary, notification.body)?;
                self.out.flush()
            }
            Notifier::Command(program) => {
                spawn_notification(program, notification);
                Ok(())
            }
        }
    }
}

impl<W: Write> EventHandler for Presenter<W> {
    type Error = PresentError;

    fn handle(&mut self, event: PolicyEvent) -> Result<(), Self::Error> {
        match event {
            PolicyEvent::BusyExceeded {
                kind: BreakKind::Short,
                ..
            } => {
                if self.indicator.set_warning() {
                    self.show()?;
                }
            }
            PolicyEvent::BusyExceeded {
                kind: BreakKind::Long,
                ..
            } => {
                if self.indicator.set_escalated() {
                    self.show()?;
                }
            }
            PolicyEvent::IdleResumed { count, .. } => self.rest(count)?,
        }
        Ok(())
    }
}

/// Runs `<program> -t <timeout> <summary> <body>` without waiting for it.
///
/// Must be called from within a tokio runtime, which reaps the child.
fn spawn_notification(program: &str, notification: &Notification) {
    let spawned = tokio::process::Command::new(program)
        .arg("-t")
        .arg(notification.timeout_ms.to_string())
        .arg(notification.summary)
        .arg(&notification.body)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(_child) => tracing::debug!(program, body = %notification.body, "notification sent"),
        Err(e) => tracing::warn!(program, error = %e, "failed to send notification"),
    }
}
