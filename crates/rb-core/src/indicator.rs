//! Status indicator state.
//!
//! The indicator only moves through three operations. Promotion to warning
//! is guarded (nominal only), promotion to escalated and reset to nominal are
//! unconditional. Each operation reports whether the visible state changed so
//! that callers render exactly once per change.

use std::fmt;

/// Visible state of the indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IndicatorState {
    /// User is fine.
    #[default]
    Nominal,
    /// A short break is due.
    Warning,
    /// A long break is due.
    Escalated,
}

impl IndicatorState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::Warning => "warning",
            Self::Escalated => "escalated",
        }
    }

    /// Icon asset shown for this state.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Nominal => "green-led.png",
            Self::Warning => "red-led.png",
            Self::Escalated => "red-cross.png",
        }
    }
}

impl fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Owner of the indicator state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indicator {
    state: IndicatorState,
}

impl Indicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> IndicatorState {
        self.state
    }

    /// Moves to warning, but only from nominal.
    pub fn set_warning(&mut self) -> bool {
        if self.state == IndicatorState::Nominal {
            self.transition(IndicatorState::Warning)
        } else {
            false
        }
    }

    /// Moves to escalated from any state.
    pub fn set_escalated(&mut self) -> bool {
        self.transition(IndicatorState::Escalated)
    }

    /// Moves to nominal from any state.
    pub fn set_nominal(&mut self) -> bool {
        self.transition(IndicatorState::Nominal)
    }

    fn transition(&mut self, next: IndicatorState) -> bool {
        if self.state == next {
            return false;
        }
        tracing::debug!(from = %self.state, to = %next, "indicator changed");
        self.state = next;
        true
    }
}
