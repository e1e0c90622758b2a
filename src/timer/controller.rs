//! Timer controller: the start/pause/reset/complete state machine

use std::sync::Arc;

use tracing::{debug, info};

use super::{Phase, TimerError, TimerState};
use crate::notify::{CompletionEvent, Notifier};

/// Drives a single `TimerState` and signals the notifier on completion
pub struct TimerController {
    state: TimerState,
    notifier: Arc<dyn Notifier>,
}

impl TimerController {
    /// Create an idle controller for the given number of minutes
    pub fn new(minutes: u64, notifier: Arc<dyn Notifier>) -> Result<Self, TimerError> {
        Ok(Self {
            state: TimerState::new(minutes)?,
            notifier,
        })
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Replace the duration and return to idle. Allowed from any phase.
    pub fn configure(&mut self, minutes: u64) -> Result<(), TimerError> {
        self.state = TimerState::new(minutes)?;
        info!("Timer configured for {} minutes", minutes);
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        match self.state.phase() {
            Phase::Idle | Phase::Paused => {
                self.state.set_phase(Phase::Running);
                info!("Timer running, {} remaining", self.state.display());
                Ok(())
            }
            phase => Err(TimerError::InvalidTransition { action: "start", phase }),
        }
    }

    pub fn pause(&mut self) -> Result<(), TimerError> {
        match self.state.phase() {
            Phase::Running => {
                self.state.set_phase(Phase::Paused);
                info!("Timer paused, {} remaining", self.state.display());
                Ok(())
            }
            phase => Err(TimerError::InvalidTransition { action: "pause", phase }),
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing unless the timer is running. Returns whether a tick was
    /// applied. Reaching zero moves to `Completed` and fires the notifier.
    pub fn tick(&mut self) -> bool {
        if self.state.phase() != Phase::Running {
            return false;
        }

        if self.state.decrement() {
            self.state.set_phase(Phase::Completed);
            info!("Timer completed after {} minutes", self.state.minutes());
            self.notifier.notify(&CompletionEvent::new(self.state.minutes()));
        } else {
            debug!("Tick: {} remaining", self.state.display());
        }
        true
    }

    /// Return to idle with the full configured duration. Allowed from any phase.
    pub fn reset(&mut self) {
        if self.state.phase() == Phase::Running {
            debug!("Timer reset before completion, no notification sent");
        }
        self.state.rewind();
        info!("Timer reset to {}", self.state.display());
    }
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
