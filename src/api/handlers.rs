//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info, warn};

use crate::{
    services::restart_process,
    settings::MAX_INTERVAL_MINUTES,
    state::AppState,
    tasks::Command,
};

use super::responses::{
    ApiResponse, DeveloperResponse, HealthResponse, IntervalChoice, IntervalsResponse,
    SetAutoStartRequest, SetIntervalRequest, SetMessageRequest, StatusResponse,
};

/// The fixed interval choices offered next to the custom one, in minutes
pub const INTERVAL_PRESETS: [u64; 5] = [1, 20, 25, 30, 60];

/// Developer page of the original author
pub const DEVELOPER_URL: &str = "https://bibekchandsah.com.np/developer.html";

/// Handle POST /start - Resume the reminder cycle
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch("start", Command::Start).await {
        Ok(snapshot) => Ok(Json(ApiResponse::ok(
            "Reminder cycle running".to_string(),
            snapshot,
        ))),
        Err(e) => {
            error!("Failed to start reminder cycle: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause the reminder cycle
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch("pause", Command::Pause).await {
        Ok(snapshot) => Ok(Json(ApiResponse::ok(
            "Reminder cycle paused".to_string(),
            snapshot,
        ))),
        Err(e) => {
            error!("Failed to pause reminder cycle: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /interval - Change the interval for future reminders
///
/// An out-of-range value is rejected without touching the current interval,
/// the same way a cancelled or non-numeric prompt leaves it unchanged.
pub async fn set_interval_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetIntervalRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if request.minutes < 1 || request.minutes > MAX_INTERVAL_MINUTES {
        warn!("Rejecting interval request of {} minutes", request.minutes);
        return Err(StatusCode::BAD_REQUEST);
    }

    let label = request
        .label
        .unwrap_or_else(|| preset_label(request.minutes));

    let command = Command::SetInterval {
        minutes: request.minutes,
        label,
    };
    match state.dispatch("set-interval", command).await {
        Ok(snapshot) => Ok(Json(ApiResponse::ok(
            format!("Interval set to {} minutes", request.minutes),
            snapshot,
        ))),
        Err(e) => {
            error!("Failed to set interval: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /intervals - List the preset choices and the current selection
pub async fn intervals_handler(State(state): State<Arc<AppState>>) -> Json<IntervalsResponse> {
    let snapshot = state.snapshot();
    let presets = INTERVAL_PRESETS
        .iter()
        .map(|&minutes| {
            let label = preset_label(minutes);
            IntervalChoice {
                minutes,
                selected: snapshot.settings.interval_label == label,
                label,
            }
        })
        .collect();

    Json(IntervalsResponse {
        presets,
        custom_selected: snapshot.settings.is_custom_interval(),
    })
}

/// Handle POST /message - Change the reminder message
pub async fn set_message_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetMessageRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let command = Command::SetMessage {
        text: request.message,
    };
    match state.dispatch("set-message", command).await {
        Ok(snapshot) => Ok(Json(ApiResponse::ok(
            format!("Reminder message set to {:?}", snapshot.settings.message),
            snapshot,
        ))),
        Err(e) => {
            error!("Failed to set message: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /autostart - Toggle launch-at-login registration
pub async fn autostart_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetAutoStartRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let command = Command::SetAutoStart {
        enabled: request.enabled,
    };
    match state.dispatch("autostart", command).await {
        Ok(snapshot) => {
            // Registration failures are logged by the scheduler and the flag
            // stays as it was; the snapshot tells the caller what held.
            let message = if snapshot.settings.auto_start == request.enabled {
                format!(
                    "Auto-start {}",
                    if request.enabled { "enabled" } else { "disabled" }
                )
            } else {
                "Auto-start registration failed, previous setting kept".to_string()
            };
            Ok(Json(ApiResponse::ok(message, snapshot)))
        }
        Err(e) => {
            error!("Failed to toggle auto-start: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /defaults - Restore the built-in default settings
pub async fn restore_defaults_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch("restore-defaults", Command::RestoreDefaults).await {
        Ok(snapshot) => Ok(Json(ApiResponse::ok(
            "Settings restored to defaults".to_string(),
            snapshot,
        ))),
        Err(e) => {
            error!("Failed to restore defaults: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /test - Fire a reminder immediately
pub async fn test_reminder_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch("test-reminder", Command::TriggerNow).await {
        Ok(snapshot) => Ok(Json(ApiResponse::ok(
            "Test reminder fired".to_string(),
            snapshot,
        ))),
        Err(e) => {
            error!("Failed to fire test reminder: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /restart - Spawn a fresh instance and quit this one
pub async fn restart_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if let Err(e) = restart_process().await {
        // Keep running rather than leave the user with no reminders at all.
        error!("Restart failed, staying up: {:#}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    info!("Replacement process spawned, shutting this one down");
    match state.dispatch("restart", Command::Quit).await {
        Ok(snapshot) => Ok(Json(ApiResponse::ok("Restarting".to_string(), snapshot))),
        Err(e) => {
            error!("Failed to quit after restart: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /quit - Shut the daemon down
pub async fn quit_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch("quit", Command::Quit).await {
        Ok(snapshot) => Ok(Json(ApiResponse::ok("Shutting down".to_string(), snapshot))),
        Err(e) => {
            error!("Failed to quit: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current scheduler and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.last_action();

    Json(StatusResponse {
        scheduler: state.snapshot(),
        uptime: state.uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handle GET /developer - Developer page link, no core involvement
pub async fn developer_handler() -> Json<DeveloperResponse> {
    Json(DeveloperResponse {
        url: DEVELOPER_URL.to_string(),
    })
}

fn preset_label(minutes: u64) -> String {
    if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", minutes)
    }
}
