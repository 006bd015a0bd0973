//! Messages marshaled into the scheduler task
//!
//! Everything that mutates scheduler state arrives here: control-surface
//! commands from the HTTP handlers and overlay events from the presenter.
//! The scheduler processes them serially, which is what makes the
//! one-rearm-per-overlay guarantee hold.

use tokio::sync::oneshot;

use crate::state::SchedulerSnapshot;

/// A control-surface action, with an optional ack carrying the
/// post-transition snapshot back to the caller
#[derive(Debug)]
pub enum Command {
    /// Clear the pause flag and (re)arm the wake-up
    Start,
    /// Set the pause flag; an armed wake-up stays armed but fires as a no-op
    Pause,
    /// Change the interval for future scheduling decisions
    SetInterval { minutes: u64, label: String },
    /// Change the reminder message shown on the next overlay
    SetMessage { text: String },
    /// Toggle OS launch-at-login registration
    SetAutoStart { enabled: bool },
    /// Reset interval, label and message to the built-in defaults
    RestoreDefaults,
    /// Fire a reminder immediately without waiting for the wake-up
    TriggerNow,
    /// Cancel everything and end the scheduler task
    Quit,
}

/// An event reported by an open overlay. Carries the overlay's generation
/// token so stale events from an already-concluded overlay are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// One-second cadence tick
    Tick { overlay_id: u64 },
    /// The user dismissed the overlay before the countdown ran out
    ManualClose { overlay_id: u64 },
}

/// Union of everything the scheduler task receives
#[derive(Debug)]
pub enum SchedulerMsg {
    Command {
        command: Command,
        ack: Option<oneshot::Sender<SchedulerSnapshot>>,
    },
    Overlay(OverlayEvent),
}
