//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::SchedulerSnapshot;

/// Request body for POST /interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetIntervalRequest {
    pub minutes: u64,
    /// Selection label; derived from the minutes when absent
    pub label: Option<String>,
}

/// Request body for POST /message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetMessageRequest {
    pub message: String,
}

/// Request body for POST /autostart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAutoStartRequest {
    pub enabled: bool,
}

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub scheduler: SchedulerSnapshot,
}

impl ApiResponse {
    pub fn new(status: String, message: String, scheduler: SchedulerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            scheduler,
        }
    }

    /// Create an ok response
    pub fn ok(message: String, scheduler: SchedulerSnapshot) -> Self {
        Self::new("ok".to_string(), message, scheduler)
    }
}

/// Status response with scheduler and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub scheduler: SchedulerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// One interval choice in the GET /intervals listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalChoice {
    pub minutes: u64,
    pub label: String,
    pub selected: bool,
}

/// Response for GET /intervals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalsResponse {
    pub presets: Vec<IntervalChoice>,
    pub custom_selected: bool,
}

/// Response for GET /developer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperResponse {
    pub url: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
