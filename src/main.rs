//! Look Away - a background break reminder daemon
//!
//! This is the main entry point for the look-away application.

use std::{sync::Arc, time::Duration};

use tracing::info;

use look_away::{
    api::create_router,
    config::Config,
    services::{AutostartRegistrar, DesktopEntryAutostart, NotificationPresenter},
    settings::SettingsStore,
    state::AppState,
    tasks::spawn_reminder_scheduler,
    utils::{bind_with_retry, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "look_away={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting look-away v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, settings={}",
        config.host,
        config.port,
        config.settings_path().display()
    );

    // Load persisted settings; any problem falls back to defaults
    let store = SettingsStore::new(config.settings_path());
    let mut settings = store.load();

    // The registrar is the source of truth for the auto-start flag
    let autostart = Arc::new(DesktopEntryAutostart::new());
    settings.auto_start = autostart.is_enabled();

    info!(
        "Reminders every {} minutes, message {:?}",
        settings.interval_minutes, settings.message
    );

    // Start the scheduler task; it arms the first wake-up immediately
    let handles = spawn_reminder_scheduler(
        store,
        settings,
        Arc::new(NotificationPresenter::new()),
        autostart,
    );

    // Create application state for the HTTP handlers
    let state = Arc::new(AppState::new(
        handles.command_tx,
        handles.snapshot_rx,
        config.port,
        config.host.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address. After a restart the previous instance
    // may still hold the port for a moment, so keep trying briefly.
    let addr = config.address();
    let listener = bind_with_retry(&addr, 20, Duration::from_millis(250)).await?;

    info!("Control surface on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start     - Resume the reminder cycle");
    info!("  POST /pause     - Pause the reminder cycle");
    info!("  POST /interval  - Change the reminder interval");
    info!("  GET  /intervals - List interval presets");
    info!("  POST /message   - Change the reminder message");
    info!("  POST /autostart - Toggle launch-at-login");
    info!("  POST /defaults  - Restore default settings");
    info!("  POST /test      - Fire a reminder now");
    info!("  POST /restart   - Restart the daemon");
    info!("  POST /quit      - Shut down");
    info!("  GET  /status    - Scheduler and server status");
    info!("  GET  /health    - Health check");

    // Serve until a signal arrives or the scheduler quits
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
        _ = handles.quit_rx => {
            info!("Scheduler quit, shutting down");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
