//! Dual-threshold busy/idle tracking.
//!
//! A [`BreakPolicy`] consumes one idle-time sample per tick and counts the
//! ticks during which the user was active. Two conditions are checked on
//! every sample, and both are level-triggered: they are reported on every
//! tick for which they hold, not only on the tick where they first become
//! true.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Samples below this many milliseconds count as a busy tick.
const BUSY_SAMPLE_MS: u64 = 1000;

/// Policy construction errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A threshold was zero.
    #[error("{field} must be greater than zero")]
    ZeroThreshold { field: &'static str },

    /// The idle threshold does not fit in milliseconds.
    #[error("break_idle_secs is too large: {value}")]
    IdleThresholdOverflow { value: u64 },
}

/// Which break a policy enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakKind {
    /// Frequent short pauses.
    Short,
    /// Occasional long pauses.
    Long,
}

impl BreakKind {
    /// String representation used in logs and output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An event raised by a policy while observing a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyEvent {
    /// The busy counter is above the policy's limit.
    BusyExceeded { kind: BreakKind, count: u64 },
    /// The user has been idle long enough to count as resting.
    ///
    /// `count` is the busy counter as it was before the reset.
    IdleResumed { kind: BreakKind, count: u64 },
}

impl PolicyEvent {
    /// The busy counter carried by this event.
    pub const fn count(&self) -> u64 {
        match self {
            Self::BusyExceeded { count, .. } | Self::IdleResumed { count, .. } => *count,
        }
    }
}

/// The events produced by a single [`BreakPolicy::observe`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Observation {
    /// Set when the busy counter was above the limit.
    pub busy_exceeded: Option<PolicyEvent>,
    /// Set when the sample was past the idle threshold.
    pub idle_resumed: Option<PolicyEvent>,
}

impl Observation {
    /// Events in the order they were raised.
    pub fn events(&self) -> impl Iterator<Item = PolicyEvent> {
        [self.busy_exceeded, self.idle_resumed].into_iter().flatten()
    }

    /// Returns `true` if no event was raised.
    pub const fn is_empty(&self) -> bool {
        self.busy_exceeded.is_none() && self.idle_resumed.is_none()
    }
}

/// Thresholds for one policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Busy ticks tolerated before the policy starts reporting.
    pub max_busy_ticks: u64,
    /// Seconds of idleness that count as a rest.
    pub break_idle_secs: u64,
}

impl PolicySettings {
    /// Three minutes of work, thirty seconds of rest.
    pub const SHORT: Self = Self {
        max_busy_ticks: 3 * 60,
        break_idle_secs: 30,
    };

    /// Thirty minutes of work, five minutes of rest.
    pub const LONG: Self = Self {
        max_busy_ticks: 30 * 60,
        break_idle_secs: 5 * 60,
    };

    /// Default settings for a break kind.
    pub const fn for_kind(kind: BreakKind) -> Self {
        match kind {
            BreakKind::Short => Self::SHORT,
            BreakKind::Long => Self::LONG,
        }
    }
}

/// Busy-tick counter with a work limit and an idle threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakPolicy {
    kind: BreakKind,
    max_busy_ticks: u64,
    break_idle_secs: u64,
    break_idle_ms: u64,
    busy_count: u64,
}

impl BreakPolicy {
    /// Creates a policy after validating its thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if either threshold is zero, or if `break_idle_secs`
    /// overflows when converted to milliseconds.
    pub fn new(
        kind: BreakKind,
        max_busy_ticks: u64,
        break_idle_secs: u64,
    ) -> Result<Self, PolicyError> {
        if max_busy_ticks == 0 {
            return Err(PolicyError::ZeroThreshold {
                field: "max_busy_ticks",
            });
        }
        if break_idle_secs == 0 {
            return Err(PolicyError::ZeroThreshold {
                field: "break_idle_secs",
            });
        }
        let break_idle_ms =
            break_idle_secs
                .checked_mul(1000)
                .ok_or(PolicyError::IdleThresholdOverflow {
                    value: break_idle_secs,
                })?;

        Ok(Self {
            kind,
            max_busy_ticks,
            break_idle_secs,
            break_idle_ms,
            busy_count: 0,
        })
    }

    /// Creates a policy from a settings block.
    pub fn from_settings(kind: BreakKind, settings: PolicySettings) -> Result<Self, PolicyError> {
        Self::new(kind, settings.max_busy_ticks, settings.break_idle_secs)
    }

    pub const fn kind(&self) -> BreakKind {
        self.kind
    }

    pub const fn max_busy_ticks(&self) -> u64 {
        self.max_busy_ticks
    }

    pub const fn break_idle_secs(&self) -> u64 {
        self.break_idle_secs
    }

    /// Busy ticks accumulated in the current episode.
    pub const fn busy_count(&self) -> u64 {
        self.busy_count
    }

    /// Feeds one idle-time sample to the policy.
    ///
    /// 1. A sample under one second counts as a busy tick.
    /// 2. While the busy counter is above `max_busy_ticks`, `BusyExceeded`
    ///    is reported.
    /// 3. While the sample is above the idle threshold, `IdleResumed` is
    ///    reported with the current counter, and the counter is reset.
    pub fn observe(&mut self, idle_ms: u64) -> Observation {
        let mut observation = Observation::default();

        if idle_ms < BUSY_SAMPLE_MS {
            self.busy_count = self.busy_count.saturating_add(1);
        }

        if self.busy_count > self.max_busy_ticks {
            observation.busy_exceeded = Some(PolicyEvent::BusyExceeded {
                kind: self.kind,
                count: self.busy_count,
            });
        }

        if idle_ms > self.break_idle_ms {
            observation.idle_resumed = Some(PolicyEvent::IdleResumed {
                kind: self.kind,
                count: self.busy_count,
            });
            tracing::trace!(kind = %self.kind, busy_count = self.busy_count, "busy episode reset");
            self.busy_count = 0;
        }

        observation
    }
}
