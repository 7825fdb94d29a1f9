use savings_tracker::{router, AppConfig, AppState, Storage};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    let storage = Storage::new(config.data_dir.clone());
    let state = AppState::load(storage).await;
    {
        let tracker = state.tracker.lock().await;
        let settings = tracker.settings();
        info!(
            data_dir = %config.data_dir.display(),
            goal = settings.goal,
            step = settings.step,
            checked = tracker.progress().checked_count(),
            "tracker loaded"
        );
    }

    let app = router(state);
    let addr = config.addr();

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
