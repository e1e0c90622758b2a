//! Countdown timer core
//!
//! This module contains the timer state machine and the types it exposes.
//! It has no knowledge of the HTTP layer or of how ticks are scheduled.

pub mod controller;
pub mod error;
pub mod state;

// Re-export main types
pub use controller::TimerController;
pub use error::TimerError;
pub use state::{Phase, TimerSnapshot, TimerState};

/// Shortest duration the timer accepts, in minutes
pub const MIN_MINUTES: u64 = 1;
/// Longest duration the timer accepts, in minutes
pub const MAX_MINUTES: u64 = 120;
/// Duration used when none is given on the command line
pub const DEFAULT_MINUTES: u64 = 20;
