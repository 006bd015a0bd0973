//! Scheduler status, countdown state and the published snapshot

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::settings::ReminderSettings;

/// Seconds the reminder overlay stays up before closing by timeout
pub const OVERLAY_COUNTDOWN_SECONDS: u8 = 20;

/// Whether the reminder cycle is firing or suspended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerStatus {
    Running,
    Paused,
}

/// Countdown for an active overlay, seeded at 20 and decremented once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub remaining_seconds: u8,
}

impl CountdownState {
    pub fn new() -> Self {
        Self {
            remaining_seconds: OVERLAY_COUNTDOWN_SECONDS,
        }
    }

    /// Advance by one tick. Returns true once the countdown has reached zero,
    /// at which point the overlay concludes by timeout.
    pub fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of the scheduler, published over a watch channel
/// whenever the scheduler transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSnapshot {
    pub status: SchedulerStatus,
    /// Fire time of the armed wake-up; not serialized, used to recompute
    /// the remaining seconds whenever the snapshot is read
    #[serde(skip)]
    pub next_fire_at: Option<Instant>,
    /// Seconds until the armed wake-up fires, as of the last refresh
    pub next_fire_in_seconds: Option<u64>,
    /// Countdown seconds left on the active overlay, if one is showing
    pub overlay_remaining_seconds: Option<u8>,
    pub settings: ReminderSettings,
}

impl SchedulerSnapshot {
    /// Initial snapshot before the scheduler task has published anything
    pub fn initial(settings: ReminderSettings) -> Self {
        Self {
            status: SchedulerStatus::Running,
            next_fire_at: None,
            next_fire_in_seconds: None,
            overlay_remaining_seconds: None,
            settings,
        }
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay_remaining_seconds.is_some()
    }

    /// Recompute the remaining seconds from the deadline, so readers see the
    /// time left now rather than at the last transition
    pub fn refresh_next_fire(&mut self) {
        self.next_fire_in_seconds = self
            .next_fire_at
            .map(|at| at.saturating_duration_since(Instant::now()).as_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_reaches_zero_on_the_twentieth_tick() {
        let mut countdown = CountdownState::new();
        for i in 1..OVERLAY_COUNTDOWN_SECONDS {
            assert!(!countdown.tick(), "countdown finished early on tick {}", i);
        }
        assert!(countdown.tick());
    }

    #[test]
    fn countdown_is_monotonically_non_increasing() {
        let mut countdown = CountdownState::new();
        let mut previous = countdown.remaining_seconds;
        for _ in 0..25 {
            countdown.tick();
            assert!(countdown.remaining_seconds <= previous);
            previous = countdown.remaining_seconds;
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SchedulerStatus::Paused).unwrap(),
            r#""paused""#
        );
    }
}
