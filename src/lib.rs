pub mod config;
pub mod error;
pub mod logging;
pub mod robot;

pub use config::{Config, SessionConfig};
pub use robot::state::SharedController;
use axum::{Router, routing::{get, post, delete}};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub robot: SharedController,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // read-only views polled by the console renderer
    let query_routes = Router::new()
        .route("/", get(root))
        .route("/console", get(robot::routes::get_console))
        .route("/state", get(robot::routes::get_state))
        .route("/messages", get(robot::routes::get_messages))
        .route("/rooms", get(robot::routes::get_rooms))
        .route("/bluetooth/devices", get(robot::routes::get_devices))
        .route("/ws/console", get(robot::routes::console_ws));

    // connection management
    let connection_routes = Router::new()
        .route("/bluetooth/scan", post(robot::routes::scan_devices))
        .route("/bluetooth/connect", post(robot::routes::connect_bluetooth))
        .route("/bluetooth", delete(robot::routes::disconnect_bluetooth))
        .route("/wifi/connect", post(robot::routes::connect_wifi))
        .route("/wifi", delete(robot::routes::disconnect_wifi));

    // driving and navigation
    let control_routes = Router::new()
        .route("/destination", post(robot::routes::set_destination))
        .route("/mode", post(robot::routes::set_mode))
        .route("/speed", post(robot::routes::set_speed))
        .route("/control", post(robot::routes::send_control))
        .route("/emergency-stop", post(robot::routes::emergency_stop));

    // robot display and simulated hardware
    let device_routes = Router::new()
        .route("/display-message", post(robot::routes::set_display_message))
        .route("/charging", post(robot::routes::set_charging))
        .route("/load", post(robot::routes::set_load))
        .route("/simulation", post(robot::routes::set_simulation));

    Router::new()
        .merge(query_routes)
        .merge(connection_routes)
        .merge(control_routes)
        .merge(device_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Robot Console API - v0.1.0"
}
