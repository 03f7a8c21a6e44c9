use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{disconnected_session, send, spawn_app};
use robot_console::SessionConfig;

#[tokio::test]
async fn test_root_banner() {
    let app = spawn_app(SessionConfig::default());
    let response = app
        .router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_console_snapshot_shape() {
    let app = spawn_app(SessionConfig::default());

    let (status, body) = send(&app, "GET", "/console", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["bluetoothStatus"], "connected");
    assert_eq!(body["state"]["wifiStatus"], "disconnected");
    assert_eq!(body["state"]["currentRoom"], "living-room");
    assert!(body["state"]["destinationRoom"].is_null());
    assert_eq!(body["state"]["batteryLevel"], 85);
    assert_eq!(body["state"]["speed"], 50);
    assert_eq!(body["state"]["mode"], "auto");
    assert_eq!(body["state"]["status"], "idle");
    assert_eq!(body["messages"][0]["type"], "info");
    assert_eq!(body["messages"][0]["message"], "System initialized");
    assert_eq!(body["isScanning"], false);
    assert_eq!(body["isSimulation"], true);
    assert_eq!(body["batteryBand"], "high");
    assert_eq!(body["loadStatus"], "normal");
}

#[tokio::test]
async fn test_rooms_topology() {
    let app = spawn_app(SessionConfig::default());

    let (status, body) = send(&app, "GET", "/rooms", None).await;

    assert_eq!(status, StatusCode::OK);
    let rooms = body.as_array().unwrap();
    assert_eq!(rooms.len(), 4);
    assert_eq!(rooms[3]["id"], "store-room");
    assert_eq!(rooms[3]["name"], "Store Room");
    assert_eq!(rooms[3]["icon"], "package");
    assert_eq!(rooms[3]["position"], json!({"x": 1, "y": 1}));
}

#[tokio::test]
async fn test_control_without_bluetooth_logs_error() {
    let app = spawn_app(disconnected_session());

    let (status, body) = send(&app, "POST", "/control", Some(json!({"direction": "forward"}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "accepted");

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["isMoving"], false);
    assert_eq!(state["status"], "idle");

    let (_, messages) = send(&app, "GET", "/messages", None).await;
    assert_eq!(messages[0]["type"], "error");
    assert_eq!(messages[0]["message"], "Bluetooth not connected");
}

#[tokio::test]
async fn test_destination_starts_navigation() {
    let app = spawn_app(SessionConfig::default());

    let (status, _) = send(&app, "POST", "/destination", Some(json!({"roomId": "kitchen"}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["destinationRoom"], "kitchen");
    assert_eq!(state["status"], "moving");
    assert_eq!(state["isMoving"], true);

    let (status, _) = send(&app, "POST", "/emergency-stop", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert!(state["destinationRoom"].is_null());
    assert_eq!(state["status"], "idle");
}

#[tokio::test]
async fn test_unknown_room_is_rejected_by_extractor() {
    let app = spawn_app(SessionConfig::default());

    let (status, _) = send(&app, "POST", "/destination", Some(json!({"roomId": "garage"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "POST", "/control", Some(json!({"direction": "up"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, messages) = send(&app, "GET", "/messages", None).await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_speed_mode_and_display_message() {
    let app = spawn_app(SessionConfig::default());

    send(&app, "POST", "/speed", Some(json!({"speed": 37}))).await;
    send(&app, "POST", "/mode", Some(json!({"mode": "manual"}))).await;
    send(&app, "POST", "/display-message", Some(json!({"message": "  Hello  "}))).await;

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["speed"], 40);
    assert_eq!(state["mode"], "manual");
    assert_eq!(state["displayMessage"], "Hello");
}

#[tokio::test]
async fn test_scan_and_connect_enter_intermediate_states() {
    let app = spawn_app(disconnected_session());

    send(&app, "POST", "/bluetooth/scan", None).await;
    let (_, devices) = send(&app, "GET", "/bluetooth/devices", None).await;
    assert_eq!(devices["isScanning"], true);
    assert_eq!(devices["devices"].as_array().unwrap().len(), 0);

    send(&app, "POST", "/bluetooth/connect", Some(json!({"deviceId": "robot-001"}))).await;
    send(&app, "POST", "/wifi/connect", None).await;
    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["bluetoothStatus"], "connecting");
    assert_eq!(state["wifiStatus"], "connecting");

    send(&app, "DELETE", "/bluetooth", None).await;
    send(&app, "DELETE", "/wifi", None).await;
    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["bluetoothStatus"], "disconnected");
    assert_eq!(state["wifiStatus"], "disconnected");
}

#[tokio::test]
async fn test_simulated_hardware_routes() {
    let app = spawn_app(SessionConfig::default());

    send(&app, "POST", "/load", Some(json!({"weight": 11.5}))).await;
    send(&app, "POST", "/charging", Some(json!({"charging": true}))).await;
    send(&app, "POST", "/simulation", Some(json!({"enabled": false}))).await;

    let (_, console) = send(&app, "GET", "/console", None).await;
    assert_eq!(console["state"]["loadWeight"], 11.5);
    assert_eq!(console["loadStatus"], "overload");
    assert_eq!(console["state"]["isCharging"], true);
    assert_eq!(console["state"]["status"], "charging");
    assert_eq!(console["isSimulation"], false);

    send(&app, "POST", "/mode", Some(json!({"mode": "manual"}))).await;
    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["mode"], "auto");
}
