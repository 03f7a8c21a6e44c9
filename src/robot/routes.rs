use super::models::{
    ChargingRequest, ConnectRequest, ConsoleSnapshot, ControlRequest, DestinationRequest,
    DevicesResponse, DisplayMessageRequest, LoadRequest, ModeRequest, SimulationRequest,
    SpeedRequest,
};
use crate::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::stream::StreamExt;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Commands are fire-and-forget: the outcome shows up in state and log.
fn accepted() -> impl IntoResponse {
    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({
            "status": "accepted"
        })),
    )
}

// --- queries ---

pub async fn get_console(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.robot.snapshot().await)
}

pub async fn get_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.robot.query(|c| c.state().clone()).await)
}

pub async fn get_messages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.robot.query(|c| c.messages()).await)
}

pub async fn get_rooms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.robot.query(|c| c.rooms()).await)
}

pub async fn get_devices(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = state
        .robot
        .query(|c| DevicesResponse {
            devices: c.devices().to_vec(),
            is_scanning: c.is_scanning(),
        })
        .await;
    Json(response)
}

// --- connection commands ---

pub async fn scan_devices(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.robot.apply(|c| c.scan_for_devices()).await;
    accepted()
}

pub async fn connect_bluetooth(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConnectRequest>,
) -> impl IntoResponse {
    state
        .robot
        .apply(|c| c.connect_bluetooth(&payload.device_id))
        .await;
    accepted()
}

pub async fn disconnect_bluetooth(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.robot.apply(|c| c.disconnect_bluetooth()).await;
    accepted()
}

pub async fn connect_wifi(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.robot.apply(|c| c.connect_wifi()).await;
    accepted()
}

pub async fn disconnect_wifi(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.robot.apply(|c| c.disconnect_wifi()).await;
    accepted()
}

// --- motion commands ---

pub async fn set_destination(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DestinationRequest>,
) -> impl IntoResponse {
    state
        .robot
        .apply(|c| c.set_destination(payload.room_id))
        .await;
    accepted()
}

pub async fn set_mode(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ModeRequest>,
) -> impl IntoResponse {
    state.robot.apply(|c| c.set_mode(payload.mode)).await;
    accepted()
}

pub async fn set_speed(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SpeedRequest>,
) -> impl IntoResponse {
    state.robot.apply(|c| c.set_speed(payload.speed)).await;
    accepted()
}

pub async fn send_control(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ControlRequest>,
) -> impl IntoResponse {
    state
        .robot
        .apply(|c| c.send_control(payload.direction))
        .await;
    accepted()
}

pub async fn emergency_stop(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.robot.apply(|c| c.emergency_stop()).await;
    accepted()
}

// --- display and simulated hardware ---

pub async fn set_display_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DisplayMessageRequest>,
) -> impl IntoResponse {
    state
        .robot
        .apply(|c| c.set_display_message(&payload.message))
        .await;
    accepted()
}

pub async fn set_charging(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChargingRequest>,
) -> impl IntoResponse {
    state.robot.apply(|c| c.set_charging(payload.charging)).await;
    accepted()
}

pub async fn set_load(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoadRequest>,
) -> impl IntoResponse {
    state.robot.apply(|c| c.set_load_weight(payload.weight)).await;
    accepted()
}

pub async fn set_simulation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SimulationRequest>,
) -> impl IntoResponse {
    state.robot.apply(|c| c.set_simulation(payload.enabled)).await;
    accepted()
}

// --- snapshot stream ---

pub async fn console_ws(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_console_socket(socket, state))
}

async fn send_snapshot(socket: &mut WebSocket, snapshot: &ConsoleSnapshot) -> Result<(), ()> {
    let msg = serde_json::to_string(snapshot).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialise console snapshot");
    })?;
    socket
        .send(Message::Text(msg.into()))
        .await
        .map_err(|_| ())
}

async fn handle_console_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let mut rx = state.robot.subscribe();

    let initial = state.robot.snapshot().await;
    if send_snapshot(&mut socket, &initial).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Ok(snapshot) => {
                    if send_snapshot(&mut socket, &snapshot).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Console subscriber lagged behind");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("Console socket closed");
}
