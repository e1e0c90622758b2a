//! Pomodoro - A state-managed HTTP server driving a countdown timer
//!
//! This library provides the timer state machine, completion notifiers,
//! the one-second ticker and the HTTP control surface around them.

pub mod config;
pub mod notify;
pub mod state;
pub mod timer;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
