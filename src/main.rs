//! Countdown Widget - a countdown timer with terminal and HTTP front-ends
//!
//! This is the main entry point for the countdown-widget application.

use tokio::net::TcpListener;
use tracing::{error, info};

use countdown_widget::{
    api::create_router,
    config::Config,
    controller::SystemClock,
    state::AppState,
    tasks::{spawn_widget, WidgetHandle},
    ui::run_terminal,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "countdown_widget={},tower_http=info",
            config.log_level()
        ))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-widget v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: serve={}, tick={}ms", config.serve, config.tick_ms);

    let (widget, widget_task) = spawn_widget(SystemClock, config.tick_interval());

    let result = if config.serve {
        serve(&config, widget.clone()).await
    } else {
        run_in_terminal(&config, &widget).await
    };

    if widget.shutdown().is_ok() {
        if let Err(e) = widget_task.await {
            error!("Widget task failed: {}", e);
        }
    }

    info!("Shutdown complete");
    result
}

async fn run_in_terminal(config: &Config, widget: &WidgetHandle) -> anyhow::Result<()> {
    let view = widget.start(config.target.clone()).await?;
    info!("Counting down to {}", view.target_input);

    tokio::select! {
        result = run_terminal(widget.subscribe(), tokio::io::stdout()) => result?,
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn serve(config: &Config, widget: WidgetHandle) -> anyhow::Result<()> {
    let state = AppState::new(widget, config.port, config.host.clone());

    // Start right away when a target was given on the command line.
    if let Some(target) = &config.target {
        if let Err(e) = state.widget.start(Some(target.clone())).await {
            error!("Initial countdown not started: {}", e);
        }
    }

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /widget - Current widget view");
    info!("  POST /start  - Start or restart the countdown");
    info!("  POST /stop   - Stop the countdown");
    info!("  GET  /health - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
