//! Pomodoro - A state-managed HTTP server driving a countdown timer
//!
//! This is the main entry point for the pomodoro application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro::{
    api::create_router,
    config::Config,
    notify::{CommandNotifier, LogNotifier, Notifiers},
    state::AppState,
    tasks::ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, timer={}min",
          config.host, config.port, config.minutes);

    // Completion goes to the log, plus the user's hook if one was given
    let mut notifiers = Notifiers::new().with(Arc::new(LogNotifier));
    if let Some(command) = &config.on_complete {
        info!("Completion hook: {}", command);
        notifiers = notifiers.with(Arc::new(CommandNotifier::new(command.clone())));
    }

    info!("{} completion notifier(s) registered", notifiers.count());

    // Create application state
    let state = Arc::new(
        AppState::new(config.port, config.host.clone(), config.minutes, Arc::new(notifiers))
            .context("Invalid timer configuration")?,
    );

    // Start the one-second ticker
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        ticker_task(ticker_state).await;
    });

    if config.autostart {
        state.start().context("Failed to autostart timer")?;
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/configure - Set duration in minutes (1-120)");
    info!("  POST /timer/start     - Start or resume the countdown");
    info!("  POST /timer/pause     - Pause the countdown");
    info!("  POST /timer/reset     - Reset to the full duration");
    info!("  GET  /status          - Check timer and server status");
    info!("  GET  /health          - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Ok(timer) = state.get_timer_state() {
        info!("Shutting down with timer {} at {}", timer.phase, timer.display);
    }
    info!("Server stopped");
    Ok(())
}
