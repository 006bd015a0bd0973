//! Look Away - a background break reminder daemon
//!
//! This library schedules periodic eye-break reminders, shows them through an
//! overlay presenter with a 20-second countdown, and exposes a local HTTP
//! control surface for pausing, interval and message changes, launch-at-login
//! and shutdown.

pub mod api;
pub mod config;
pub mod services;
pub mod settings;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use settings::{ReminderSettings, SettingsStore};
pub use state::AppState;
pub use tasks::spawn_reminder_scheduler;
pub use utils::signals::shutdown_signal;
