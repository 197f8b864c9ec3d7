//! Press tracking and duration classification.
//!
//! The button is active-low: a falling edge opens a press and the next rising
//! edge closes it. Only one press is tracked at a time.

use std::time::Duration;

/// Thresholds separating short, medium and long presses.
///
/// Both bounds are inclusive on the medium side: a press of exactly
/// `medium` or exactly `long` is a medium press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressThresholds {
    /// Shortest press that counts as medium.
    pub medium: Duration,
    /// Longest press that still counts as medium.
    pub long: Duration,
}

impl Default for PressThresholds {
    fn default() -> Self {
        Self {
            medium: Duration::from_secs(3),
            long: Duration::from_secs(10),
        }
    }
}

/// Duration bucket for a completed press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Short,
    Medium,
    Long,
}

impl PressKind {
    /// Classify a press duration against the given thresholds.
    pub fn classify(held: Duration, thresholds: &PressThresholds) -> Self {
        if held < thresholds.medium {
            PressKind::Short
        } else if held <= thresholds.long {
            PressKind::Medium
        } else {
            PressKind::Long
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PressKind::Short => "Short press",
            PressKind::Medium => "Medium press",
            PressKind::Long => "Long press",
        }
    }
}

/// Whether a press is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressState {
    #[default]
    Idle,
    /// A falling edge was seen at `since` (monotonic event time).
    Open { since: Duration },
}

/// Owns the press state and applies edge transitions to it.
#[derive(Debug, Default)]
pub struct PressTracker {
    state: PressState,
}

impl PressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    /// Open a press at `at`.
    ///
    /// Returns the start of a stale press that was still open, if any.
    pub fn press(&mut self, at: Duration) -> Option<Duration> {
        let stale = match self.state {
            PressState::Open { since } => Some(since),
            PressState::Idle => None,
        };
        self.state = PressState::Open { since: at };
        stale
    }

    /// Close the open press at `at` and return how long it was held.
    ///
    /// Returns `None` and leaves the state idle when no press was open.
    pub fn release(&mut self, at: Duration) -> Option<Duration> {
        match std::mem::take(&mut self.state) {
            PressState::Open { since } => Some(at.saturating_sub(since)),
            PressState::Idle => None,
        }
    }
}
