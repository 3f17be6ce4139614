use ps_server::{AppState, build_router, logger};

use ps_history::cleanup_old_exports;

use std::error::Error;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

/// How often expired session exports are swept.
const EXPORT_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = ps_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    let log_file_path = logger::log_file_path(&config)?;
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting ps-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Database pool; migrations run on open
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = ps_db::open_pool(&database_path).await?;

    let bind_addr = config.bind_addr();
    let max_age = Duration::from_secs(config.export.max_age_secs);
    let app_state = AppState::new(pool, config)?;

    // Periodic export cleanup
    let export_dir = app_state.export.dir.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(EXPORT_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let report = cleanup_old_exports(&export_dir, max_age).await;
            for failure in &report.errors {
                warn!("Export cleanup: {}", failure);
            }
        }
    });

    let app = build_router(app_state);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => {
                    error!("Failed to listen for SIGINT: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}
