use robot_console::{create_router, logging, robot, AppState, Config, SharedController};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init();

    let config = Config::from_env()?;
    info!(
        address    = %config.server_address,
        simulation = config.session.simulation,
        "Loaded configuration"
    );

    let shared = SharedController::new(&config.session);
    tokio::spawn(robot::run_timer_driver(shared.clone()));

    let state = Arc::new(AppState {
        config: config.clone(),
        robot: shared,
    });
    let app = create_router(state);

    info!("starting server on {}", config.server_address);
    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
