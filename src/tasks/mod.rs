//! Background tasks module
//!
//! This module contains the reminder scheduler task and the message types
//! marshaled into it.

pub mod messages;
pub mod reminder_scheduler;

// Re-export main types
pub use messages::{Command, OverlayEvent, SchedulerMsg};
pub use reminder_scheduler::{spawn_reminder_scheduler, SchedulerHandles};
