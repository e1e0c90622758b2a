//! Timer error types

use super::state::Phase;

/// Errors raised by timer operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("Invalid duration: {minutes} minutes (must be between 1 and 120)")]
    InvalidDuration { minutes: u64 },

    #[error("Cannot {action} while timer is {phase}")]
    InvalidTransition { action: &'static str, phase: Phase },
}
