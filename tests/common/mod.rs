use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use robot_console::robot::clock::ManualClock;
use robot_console::robot::models::RobotStatus;
use robot_console::robot::RobotController;
use robot_console::{create_router, AppState, Config, SessionConfig, SharedController};
use std::sync::Arc;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
pub fn spawn_app(session: SessionConfig) -> TestApp {
    let config = Config {
        server_address: "127.0.0.1:0".to_string(),
        session,
    };

    let robot = SharedController::new(&config.session);
    let state = Arc::new(AppState { config, robot });
    let router = create_router(state.clone());

    TestApp { router, state }
}

/// Fire a request at the router and decode the JSON body (Null when empty).
#[allow(dead_code)]
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Controller on a hand-driven clock.
#[allow(dead_code)]
pub fn controller(session: SessionConfig) -> (RobotController, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let controller = RobotController::new(&session, clock.clone());
    (controller, clock)
}

/// Move the clock forward and apply whatever fell due.
#[allow(dead_code)]
pub fn advance(controller: &mut RobotController, clock: &ManualClock, ms: u64) -> usize {
    clock.advance_ms(ms);
    controller.fire_due()
}

#[allow(dead_code)]
pub fn disconnected_session() -> SessionConfig {
    SessionConfig {
        bluetooth_connected: false,
        ..SessionConfig::default()
    }
}

/// Destination set implies an active navigation.
#[allow(dead_code)]
pub fn assert_invariants(controller: &RobotController) {
    let state = controller.state();
    if state.destination_room.is_some() {
        assert_eq!(state.status, RobotStatus::Moving, "destination without moving status");
        assert!(state.is_moving, "destination without is_moving");
    }
    assert!(controller.messages().len() <= 20);
    assert!((10..=100).contains(&state.speed) && state.speed % 10 == 0);
}
