//! Timer state structure and derived views

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{TimerError, MAX_MINUTES, MIN_MINUTES};

/// Lifecycle phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Countdown state: configured length, time left and current phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    total_seconds: u64,
    remaining_seconds: u64,
    phase: Phase,
}

impl TimerState {
    /// Create an idle timer state for the given number of minutes
    pub fn new(minutes: u64) -> Result<Self, TimerError> {
        let total_seconds = validate_minutes(minutes)? * 60;
        Ok(Self {
            total_seconds,
            remaining_seconds: total_seconds,
            phase: Phase::Idle,
        })
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configured duration in whole minutes
    pub fn minutes(&self) -> u64 {
        self.total_seconds / 60
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.total_seconds - self.remaining_seconds
    }

    /// Fraction of the countdown already elapsed, from 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        self.elapsed_seconds() as f64 / self.total_seconds as f64
    }

    /// Remaining time as `MM:SS`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_seconds / 60, self.remaining_seconds % 60)
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Refill the countdown and go back to idle
    pub(crate) fn rewind(&mut self) {
        self.remaining_seconds = self.total_seconds;
        self.phase = Phase::Idle;
    }

    /// Remove one second. Returns true when the countdown just reached zero.
    pub(crate) fn decrement(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            minutes: self.minutes(),
            total_seconds: self.total_seconds,
            remaining_seconds: self.remaining_seconds,
            elapsed_seconds: self.elapsed_seconds(),
            progress: self.progress(),
            display: self.display(),
        }
    }
}

/// Serializable copy of the timer state, published on every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub minutes: u64,
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub elapsed_seconds: u64,
    pub progress: f64,
    pub display: String,
}

impl TimerSnapshot {
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

fn validate_minutes(minutes: u64) -> Result<u64, TimerError> {
    if (MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(TimerError::InvalidDuration { minutes })
    }
}
