//! State management module
//!
//! This module holds the shared application state wrapping the timer.

pub mod app_state;

// Re-export main types
pub use app_state::{AppError, AppState};
