//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::info;

use crate::{
    notify::Notifier,
    timer::{TimerController, TimerError, TimerSnapshot},
};

/// Errors surfaced by application state operations
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to lock {0} state")]
    StatePoisoned(&'static str),
}

/// Main application state that owns the timer and server metadata
#[derive(Debug)]
pub struct AppState {
    /// The single countdown controller
    timer: Mutex<TimerController>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState with an idle timer of `minutes`
    pub fn new(
        port: u16,
        host: String,
        minutes: u64,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, TimerError> {
        let timer = TimerController::new(minutes, notifier)?;
        let (timer_update_tx, timer_update_rx) = watch::channel(timer.state().snapshot());

        Ok(Self {
            timer: Mutex::new(timer),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        })
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerController>, AppError> {
        self.timer.lock().map_err(|_| AppError::StatePoisoned("timer"))
    }

    /// Apply a user action to the timer, record it and publish the new snapshot
    fn apply<F>(&self, action: &str, op: F) -> Result<TimerSnapshot, AppError>
    where
        F: FnOnce(&mut TimerController) -> Result<(), TimerError>,
    {
        let mut timer = self.lock_timer()?;
        op(&mut timer)?;
        let snapshot = timer.state().snapshot();
        // Publish under the lock so snapshots go out in mutation order
        self.publish(snapshot.clone());
        drop(timer);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        self.timer_update_tx.send_replace(snapshot);
    }

    /// Set a new duration, returning the timer to idle
    pub fn configure(&self, minutes: u64) -> Result<TimerSnapshot, AppError> {
        info!("Configuring timer for {} minutes", minutes);
        self.apply("configure", |timer| timer.configure(minutes))
    }

    pub fn start(&self) -> Result<TimerSnapshot, AppError> {
        self.apply("start", |timer| timer.start())
    }

    pub fn pause(&self) -> Result<TimerSnapshot, AppError> {
        self.apply("pause", |timer| timer.pause())
    }

    pub fn reset(&self) -> Result<TimerSnapshot, AppError> {
        self.apply("reset", |timer| {
            timer.reset();
            Ok(())
        })
    }

    /// Advance the countdown by one second (ticker use only).
    ///
    /// Ticks are not recorded as user actions. A snapshot is published only
    /// when the tick was applied.
    pub fn tick(&self) -> Result<TimerSnapshot, AppError> {
        let mut timer = self.lock_timer()?;
        let ticked = timer.tick();
        let snapshot = timer.state().snapshot();
        if ticked {
            self.publish(snapshot.clone());
        }
        Ok(snapshot)
    }

    /// Get current timer snapshot
    pub fn get_timer_state(&self) -> Result<TimerSnapshot, AppError> {
        self.lock_timer().map(|timer| timer.state().snapshot())
    }

    /// Subscribe to timer snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

fn format_uptime(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{notify::LogNotifier, timer::Phase};

    fn app_state(minutes: u64) -> AppState {
        AppState::new(20554, "127.0.0.1".to_string(), minutes, Arc::new(LogNotifier)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_initial_duration() {
        let result = AppState::new(0, "127.0.0.1".to_string(), 121, Arc::new(LogNotifier));
        assert!(matches!(result, Err(TimerError::InvalidDuration { minutes: 121 })));
    }

    #[test]
    fn test_actions_are_recorded_and_published() {
        let state = app_state(1);
        let rx = state.subscribe();
        assert_eq!(state.get_last_action().0, None);

        let snapshot = state.start().unwrap();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(rx.borrow().phase, Phase::Running);

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("start"));
        assert!(time.is_some());
    }

    #[test]
    fn test_failed_action_is_not_recorded() {
        let state = app_state(1);
        let err = state.pause().unwrap_err();
        assert!(matches!(err, AppError::Timer(TimerError::InvalidTransition { .. })));
        assert_eq!(state.get_last_action().0, None);
    }

    #[test]
    fn test_tick_publishes_only_when_running() {
        let state = app_state(1);
        let mut rx = state.subscribe();
        rx.borrow_and_update();

        state.tick().unwrap();
        assert!(!rx.has_changed().unwrap());

        state.start().unwrap();
        rx.borrow_and_update();
        let snapshot = state.tick().unwrap();
        assert_eq!(snapshot.remaining_seconds, 59);
        assert!(rx.has_changed().unwrap());
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[test]
    fn test_configure_and_reset() {
        let state = app_state(20);
        let snapshot = state.configure(45).unwrap();
        assert_eq!(snapshot.total_seconds, 2700);

        state.start().unwrap();
        state.tick().unwrap();
        let snapshot = state.reset().unwrap();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.remaining_seconds, 2700);
    }

    #[test]
    fn test_published_snapshot_matches_state_under_contention() {
        let state = Arc::new(app_state(120));
        let rx = state.subscribe();

        for _ in 0..50 {
            state.start().unwrap();
            let handles: Vec<_> = (0..4)
                .map(|worker| {
                    let state = Arc::clone(&state);
                    std::thread::spawn(move || {
                        for _ in 0..200 {
                            if worker == 0 {
                                state.reset().unwrap();
                                let _ = state.start();
                            } else {
                                state.tick().unwrap();
                            }
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(*rx.borrow(), state.get_timer_state().unwrap());
            state.reset().unwrap();
        }
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(3), "3s");
        assert_eq!(format_uptime(123), "2m 3s");
        assert_eq!(format_uptime(3723), "1h 2m 3s");
    }
}
