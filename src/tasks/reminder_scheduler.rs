//! Reminder scheduler background task
//!
//! The single scheduling domain of the application. Every state transition -
//! control commands from the HTTP handlers and tick/close events from the
//! overlay presenter - is marshaled onto this task through one channel and
//! processed serially. At most one wake-up deadline exists at any time, and
//! each overlay lifecycle rearms the next wake-up exactly once: whichever of
//! the two close paths (countdown timeout, manual close) is processed first
//! takes the overlay with it, so the loser finds nothing left to close.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{mpsc, oneshot, watch},
    time::{sleep_until, Instant},
};
use tracing::{debug, info, warn};

use crate::{
    services::{AutostartRegistrar, OverlayHandle, OverlayPresenter},
    settings::{ReminderSettings, SettingsStore},
    state::{CountdownState, SchedulerSnapshot, SchedulerStatus},
};

use super::messages::{Command, OverlayEvent, SchedulerMsg};

/// Capacity of the scheduler command/event channel
const CHANNEL_CAPACITY: usize = 64;

/// Channels for talking to a spawned scheduler task
pub struct SchedulerHandles {
    pub command_tx: mpsc::Sender<SchedulerMsg>,
    pub snapshot_rx: watch::Receiver<SchedulerSnapshot>,
    pub quit_rx: oneshot::Receiver<()>,
}

/// Spawn the reminder scheduler task and return its channels.
/// The scheduler starts in `Running` with a wake-up armed for one interval
/// from now.
pub fn spawn_reminder_scheduler(
    store: SettingsStore,
    settings: ReminderSettings,
    presenter: Arc<dyn OverlayPresenter>,
    autostart: Arc<dyn AutostartRegistrar>,
) -> SchedulerHandles {
    let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (snapshot_tx, snapshot_rx) = watch::channel(SchedulerSnapshot::initial(settings.clone()));
    let (quit_tx, quit_rx) = oneshot::channel();

    let core = SchedulerCore {
        store,
        settings,
        status: SchedulerStatus::Running,
        deadline: None,
        overlay: None,
        next_overlay_id: 0,
        presenter,
        autostart,
        snapshot_tx,
        events_tx: command_tx.clone(),
    };

    tokio::spawn(async move {
        reminder_scheduler_task(core, command_rx, quit_tx).await;
    });

    SchedulerHandles {
        command_tx,
        snapshot_rx,
        quit_rx,
    }
}

/// Event loop of the scheduler task
async fn reminder_scheduler_task(
    mut core: SchedulerCore,
    mut rx: mpsc::Receiver<SchedulerMsg>,
    quit_tx: oneshot::Sender<()>,
) {
    info!("Starting reminder scheduler task");
    core.arm();
    core.publish();

    loop {
        let deadline = core.deadline;
        tokio::select! {
            msg = rx.recv() => {
                match msg {
                    Some(msg) => {
                        if core.handle_message(msg) == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        warn!("Command channel closed, stopping scheduler");
                        break;
                    }
                }
            }
            // The one pending wake-up. Never armed while an overlay is
            // showing, so this branch is the only way into `Showing`.
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                core.on_wakeup_fired();
            }
        }
    }

    info!("Reminder scheduler task finished");
    let _ = quit_tx.send(());
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An overlay currently on screen, identified by its generation token
struct ActiveOverlay {
    id: u64,
    countdown: CountdownState,
    handle: OverlayHandle,
}

/// State owned exclusively by the scheduler task
struct SchedulerCore {
    store: SettingsStore,
    settings: ReminderSettings,
    status: SchedulerStatus,
    deadline: Option<Instant>,
    overlay: Option<ActiveOverlay>,
    next_overlay_id: u64,
    presenter: Arc<dyn OverlayPresenter>,
    autostart: Arc<dyn AutostartRegistrar>,
    snapshot_tx: watch::Sender<SchedulerSnapshot>,
    events_tx: mpsc::Sender<SchedulerMsg>,
}

impl SchedulerCore {
    fn handle_message(&mut self, msg: SchedulerMsg) -> Flow {
        match msg {
            SchedulerMsg::Command { command, ack } => {
                let flow = self.handle_command(command);
                self.publish();
                if let Some(ack) = ack {
                    let _ = ack.send(self.snapshot());
                }
                flow
            }
            SchedulerMsg::Overlay(event) => {
                self.handle_overlay_event(event);
                Flow::Continue
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Start => {
                self.status = SchedulerStatus::Running;
                if self.overlay.is_none() {
                    // Arming replaces any pending wake-up, so a second Start
                    // while already waiting never creates a second one.
                    self.arm();
                }
                info!("Reminder cycle running");
            }
            Command::Pause => {
                // The armed wake-up stays in place; its firing becomes a
                // no-op while paused.
                self.status = SchedulerStatus::Paused;
                info!("Reminder cycle paused");
            }
            Command::SetInterval { minutes, label } => {
                if minutes < 1 {
                    warn!("Rejecting interval of {} minutes", minutes);
                } else {
                    self.settings.interval_minutes = minutes;
                    self.settings.interval_label = label;
                    self.persist();
                    // The already-armed wake-up keeps its fire time; the new
                    // interval applies from the next arming on.
                    info!("Interval set to {} minutes", minutes);
                }
            }
            Command::SetMessage { text } => {
                self.settings.message = ReminderSettings::normalize_message(&text);
                self.persist();
                info!("Reminder message set to {:?}", self.settings.message);
            }
            Command::SetAutoStart { enabled } => {
                let result = if enabled {
                    self.autostart.enable()
                } else {
                    self.autostart.disable()
                };
                match result {
                    Ok(()) => {
                        self.settings.auto_start = enabled;
                        self.persist();
                    }
                    Err(e) => warn!("Auto-start registration failed: {:#}", e),
                }
            }
            Command::RestoreDefaults => {
                // Resets the config only; a waiting or showing cycle is not
                // interrupted.
                self.settings.restore_defaults();
                self.persist();
                info!("Settings restored to defaults");
            }
            Command::TriggerNow => {
                if self.overlay.is_none() {
                    self.deadline = None;
                    self.open_overlay();
                } else {
                    debug!("Test reminder requested while an overlay is showing, ignoring");
                }
            }
            Command::Quit => {
                self.deadline = None;
                if let Some(overlay) = self.overlay.take() {
                    overlay.handle.close();
                }
                info!("Quit requested");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn handle_overlay_event(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::Tick { overlay_id } => {
                let Some(overlay) = self.overlay.as_mut() else {
                    debug!("Tick for overlay {} after it concluded, ignoring", overlay_id);
                    return;
                };
                if overlay.id != overlay_id {
                    debug!("Tick for stale overlay {}, ignoring", overlay_id);
                    return;
                }
                if overlay.countdown.tick() {
                    self.conclude_overlay("timeout");
                }
                self.publish();
            }
            OverlayEvent::ManualClose { overlay_id } => match self.overlay.as_ref() {
                Some(overlay) if overlay.id == overlay_id => {
                    self.conclude_overlay("manual close");
                    self.publish();
                }
                _ => {
                    debug!(
                        "Manual close for overlay {} after it concluded, ignoring",
                        overlay_id
                    );
                }
            },
        }
    }

    /// The armed wake-up elapsed
    fn on_wakeup_fired(&mut self) {
        self.deadline = None;
        if self.status == SchedulerStatus::Paused {
            // No overlay, no rearm; the cycle stays idle until Start.
            debug!("Wake-up fired while paused, ignoring");
            self.publish();
            return;
        }
        self.open_overlay();
        self.publish();
    }

    fn open_overlay(&mut self) {
        let id = self.next_overlay_id;
        self.next_overlay_id += 1;

        let handle = self
            .presenter
            .open(&self.settings.message, id, self.events_tx.clone());
        self.overlay = Some(ActiveOverlay {
            id,
            countdown: CountdownState::new(),
            handle,
        });
        info!("Overlay {} opened with message {:?}", id, self.settings.message);
    }

    /// Close the active overlay and rearm the next wake-up. Taking the
    /// overlay out of the option is the atomic decision point: the second
    /// close path to arrive finds it gone and does nothing.
    fn conclude_overlay(&mut self, reason: &str) {
        if let Some(overlay) = self.overlay.take() {
            overlay.handle.close();
            self.arm();
            info!(
                "Overlay {} closed ({}), next reminder in {} minutes",
                overlay.id, reason, self.settings.interval_minutes
            );
        }
    }

    /// Arm the single wake-up for one interval from now, replacing any
    /// pending one
    fn arm(&mut self) {
        let interval = Duration::from_secs(self.settings.interval_minutes.saturating_mul(60));
        self.deadline = Some(Instant::now() + interval);
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            warn!("Failed to persist settings: {:#}", e);
        }
    }

    fn publish(&self) {
        let _ = self.snapshot_tx.send(self.snapshot());
    }

    fn snapshot(&self) -> SchedulerSnapshot {
        let mut snapshot = SchedulerSnapshot {
            status: self.status,
            next_fire_at: self.deadline,
            next_fire_in_seconds: None,
            overlay_remaining_seconds: self
                .overlay
                .as_ref()
                .map(|overlay| overlay.countdown.remaining_seconds),
            settings: self.settings.clone(),
        };
        snapshot.refresh_next_fire();
        snapshot
    }
}
