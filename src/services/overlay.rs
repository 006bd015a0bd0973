//! Overlay presenter - the surface that shows the reminder

use std::time::Duration;

use notify_rust::{Notification, Timeout};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::state::OVERLAY_COUNTDOWN_SECONDS;
use crate::tasks::{OverlayEvent, SchedulerMsg};

/// Presents a reminder to the user and feeds tick / manual-close events back
/// into the scheduler. The scheduler decides the timeout; the presenter only
/// reports the passage of seconds.
pub trait OverlayPresenter: Send + Sync {
    fn open(
        &self,
        message: &str,
        overlay_id: u64,
        events: mpsc::Sender<SchedulerMsg>,
    ) -> OverlayHandle;
}

/// Handle to an open overlay; closing it stops event delivery
pub struct OverlayHandle {
    closer: Option<Box<dyn FnOnce() + Send>>,
}

impl OverlayHandle {
    pub fn new(closer: impl FnOnce() + Send + 'static) -> Self {
        Self {
            closer: Some(Box::new(closer)),
        }
    }

    /// Handle for presenters with nothing to tear down
    pub fn noop() -> Self {
        Self { closer: None }
    }

    pub fn close(mut self) {
        if let Some(closer) = self.closer.take() {
            closer();
        }
    }
}

impl std::fmt::Debug for OverlayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayHandle")
            .field("open", &self.closer.is_some())
            .finish()
    }
}

/// Desktop-notification presenter
///
/// Shows the reminder as a desktop notification and emits ticks at a
/// one-second cadence until closed. A failed notification is logged and tick
/// delivery continues so the scheduler still rearms the next wake-up.
#[derive(Debug, Default)]
pub struct NotificationPresenter;

impl NotificationPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl OverlayPresenter for NotificationPresenter {
    fn open(
        &self,
        message: &str,
        overlay_id: u64,
        events: mpsc::Sender<SchedulerMsg>,
    ) -> OverlayHandle {
        let body = message.to_string();
        let task = tokio::spawn(async move {
            let shown = tokio::task::spawn_blocking(move || {
                Notification::new()
                    .summary("Look away")
                    .body(&body)
                    .timeout(Timeout::Milliseconds(
                        u32::from(OVERLAY_COUNTDOWN_SECONDS) * 1000,
                    ))
                    .show()
            })
            .await;

            match shown {
                Ok(Ok(_)) => debug!("Notification shown for overlay {}", overlay_id),
                Ok(Err(e)) => warn!("Failed to show notification: {}", e),
                Err(e) => warn!("Notification task panicked: {}", e),
            }

            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick completes immediately; skip it so the
            // first reported tick lands one second after open.
            interval.tick().await;
            loop {
                interval.tick().await;
                let event = SchedulerMsg::Overlay(OverlayEvent::Tick { overlay_id });
                if events.send(event).await.is_err() {
                    break;
                }
            }
        });

        OverlayHandle::new(move || task.abort())
    }
}
