use bh_core::ReconcilePolicy;
use bh_engine::HttpWorkflowEngine;
use bh_orchestrator::Orchestrator;
use bh_server::{AppState, ShutdownCoordinator, build_router, logger};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = bh_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = bh_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting bh-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Open the state database
    let database_path = config.database_path()?;
    info!("Opening database: {}", database_path.display());
    let pool = bh_store::connect(&database_path).await?;
    info!("Database ready");

    // Workflow engine client
    let engine = Arc::new(HttpWorkflowEngine::new(&config.engine)?);
    info!("Workflow engine client targeting {}", config.engine.base_url);

    // Restore the lifecycle orchestrator
    let policy = ReconcilePolicy {
        max_unknown_polls: config.lifecycle.max_unknown_polls,
        max_transition_secs: config.lifecycle.max_transition_secs,
    };
    let orchestrator = Arc::new(Orchestrator::restore(engine, pool, policy).await?);

    // Build application state and router
    let app_state = AppState {
        orchestrator: orchestrator.clone(),
    };
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Create shutdown coordinator
    let shutdown = ShutdownCoordinator::new();

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Background reconciliation tick (when configured)
    if config.lifecycle.tick_secs > 0 {
        let tick_secs = config.lifecycle.tick_secs;
        let orchestrator_for_tick = orchestrator.clone();
        let mut shutdown_rx = shutdown.subscribe();

        info!("Background reconciliation enabled: {}s interval", tick_secs);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(tick_secs));
            // The first tick fires immediately; skip it so the interval
            // starts counting from now.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => orchestrator_for_tick.tick().await,
                    _ = shutdown_rx.recv() => break,
                }
            }
        });
    }

    // Start server with graceful shutdown
    info!("Server ready to accept requests");
    let mut shutdown_rx = shutdown.subscribe();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Graceful shutdown complete");
        })
        .await?;

    Ok(())
}
