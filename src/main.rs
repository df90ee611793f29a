//! Pomodoro Server - A Pomodoro timer daemon
//!
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    api::create_router,
    config::Config,
    services::{check_permission, DesktopNotifier},
    state::AppState,
    tasks::ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    config.validate().map_err(anyhow::Error::msg)?;

    let timer_config = config.timer_config();
    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, mode={}",
          config.host, config.port, timer_config.mode_label());

    // Permission is checked once; a denial only silences alerts
    let notifications_enabled = check_permission(config.no_notifications).await;

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        timer_config,
        config.initial_theme(),
        Arc::new(DesktopNotifier::new()),
        notifications_enabled,
    ));

    // Start the countdown ticker
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        ticker_task(ticker_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start, /stop, /reset          - Control the countdown");
    info!("  POST /work/increase, /work/decrease - Adjust work duration by one minute");
    info!("  POST /preset                        - Select 25/5, 35/10 or 50/10");
    info!("  POST /choose/work, /choose/break    - Next phase after time is up");
    info!("  POST /dismiss                       - Close the time's-up prompt");
    info!("  GET  /themes, POST /theme/:index    - Theme selection");
    info!("  GET  /history                       - Started sessions");
    info!("  GET  /status                        - Timer status");
    info!("  GET  /health                        - Health check");

    // Setup graceful shutdown
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
    }

    info!("Server shutdown complete");
    Ok(())
}
