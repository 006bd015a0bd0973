//! Main application state shared with the HTTP handlers

use std::{
    sync::Mutex,
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};

use super::SchedulerSnapshot;
use crate::tasks::{Command, SchedulerMsg};

/// Shared handle the HTTP handlers use to talk to the scheduler task.
/// Holds no scheduler state itself; every mutation goes over the command
/// channel and is answered with the post-transition snapshot.
#[derive(Debug)]
pub struct AppState {
    /// Commands into the scheduler task
    command_tx: mpsc::Sender<SchedulerMsg>,
    /// Latest scheduler snapshot
    snapshot_rx: watch::Receiver<SchedulerSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(
        command_tx: mpsc::Sender<SchedulerMsg>,
        snapshot_rx: watch::Receiver<SchedulerSnapshot>,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            command_tx,
            snapshot_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Send a command to the scheduler and wait for the post-transition
    /// snapshot
    pub async fn dispatch(
        &self,
        action: &str,
        command: Command,
    ) -> Result<SchedulerSnapshot, String> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.command_tx
            .send(SchedulerMsg::Command {
                command,
                ack: Some(ack_tx),
            })
            .await
            .map_err(|e| format!("Scheduler is not running: {}", e))?;

        let snapshot = ack_rx
            .await
            .map_err(|e| format!("Scheduler dropped the request: {}", e))?;

        self.record_action(action);
        Ok(snapshot)
    }

    /// Latest snapshot published by the scheduler, with the remaining time
    /// until the next wake-up recomputed as of now
    pub fn snapshot(&self) -> SchedulerSnapshot {
        let mut snapshot = self.snapshot_rx.borrow().clone();
        snapshot.refresh_next_fire();
        snapshot
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let action = self.last_action.lock().ok().and_then(|a| a.clone());
        let time = self.last_action_time.lock().ok().and_then(|t| *t);
        (action, time)
    }

    /// Calculate server uptime as a formatted string
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
