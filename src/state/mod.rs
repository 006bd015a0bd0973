//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod scheduler_state;

// Re-export main types
pub use app_state::AppState;
pub use scheduler_state::{
    CountdownState, SchedulerSnapshot, SchedulerStatus, OVERLAY_COUNTDOWN_SECONDS,
};
