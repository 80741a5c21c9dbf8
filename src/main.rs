use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use staybook::config::Config;
use staybook::http::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    staybook::observability::init(config.metrics_port)?;

    let engine = Arc::new(config.open_engine());
    if config.seed_on_empty {
        match engine.list_hotels().await {
            Ok(hotels) if hotels.is_empty() => {
                if let Err(e) = staybook::seed::seed(&engine).await {
                    error!("seeding failed: {e}");
                }
            }
            Ok(_) => info!("store not empty, skipping seed"),
            Err(e) => error!("cannot seed: {e}"),
        }
    }

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("staybook listening on {addr}");
    info!("  data_dir: {}", config.data_dir.display());
    info!("  store: {:?}", config.store);
    info!("  metrics: {}", config.metrics_port.map_or("disabled".to_string(), |p| format!("http://0.0.0.0:{p}/metrics")));

    let app = create_router(AppState::new(engine));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("staybook stopped");
    Ok(())
}

/// Resolves on ctrl-c or SIGTERM; in-flight requests then drain.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                error!("failed to register SIGTERM handler: {e}");
                ctrl_c.await.ok();
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
    info!("shutdown signal received, draining requests");
}
