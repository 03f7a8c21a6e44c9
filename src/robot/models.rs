use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomId {
    LivingRoom,
    Bedroom,
    Kitchen,
    StoreRoom,
}

impl RoomId {
    pub const ALL: [RoomId; 4] = [
        RoomId::LivingRoom,
        RoomId::Bedroom,
        RoomId::Kitchen,
        RoomId::StoreRoom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomId::LivingRoom => "living-room",
            RoomId::Bedroom => "bedroom",
            RoomId::Kitchen => "kitchen",
            RoomId::StoreRoom => "store-room",
        }
    }

    /// Room id with separators replaced by spaces, as used in log messages.
    pub fn spoken(&self) -> String {
        self.as_str().replace('-', " ")
    }

    pub fn parse(value: &str) -> Option<RoomId> {
        RoomId::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomIcon {
    Sofa,
    Bed,
    Chef,
    Package,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u8,
    pub y: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: &'static str,
    pub icon: RoomIcon,
    pub position: GridPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RobotMode {
    Auto,
    Manual,
}

impl fmt::Display for RobotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotMode::Auto => f.write_str("auto"),
            RobotMode::Manual => f.write_str("manual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Idle,
    Moving,
    ObstacleDetected,
    TaskCompleted,
    Charging,
    EmergencyStop,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlDirection {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotState {
    pub bluetooth_status: ConnectionStatus,
    pub wifi_status: ConnectionStatus,
    pub current_room: Option<RoomId>,
    pub destination_room: Option<RoomId>,
    pub battery_level: u8,
    pub signal_strength: u8,
    pub mode: RobotMode,
    pub status: RobotStatus,
    pub speed: u8,
    pub is_moving: bool,
    pub is_charging: bool,
    pub load_weight: f64, // kg
    pub max_load_weight: f64, // kg
    pub display_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BluetoothDevice {
    pub id: String,
    pub name: String,
    pub rssi: i16, // dBm
    pub is_robot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryBand {
    High,
    Medium,
    Low,
}

impl BatteryBand {
    pub fn from_level(level: u8) -> Self {
        if level > 60 {
            BatteryBand::High
        } else if level > 20 {
            BatteryBand::Medium
        } else {
            BatteryBand::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Normal,
    Warning,
    Overload,
}

impl LoadStatus {
    pub fn from_weights(weight: f64, max_weight: f64) -> Self {
        let percentage = weight / max_weight * 100.0;
        if percentage >= 100.0 {
            LoadStatus::Overload
        } else if percentage >= 80.0 {
            LoadStatus::Warning
        } else {
            LoadStatus::Normal
        }
    }
}

/// Outcome of a simulated link connection once its delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectOutcome {
    #[default]
    Succeed,
    Fail,
}

/// Read-only view of a console session handed to renderers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleSnapshot {
    pub state: RobotState,
    pub messages: Vec<StatusMessage>,
    pub devices: Vec<BluetoothDevice>,
    pub is_scanning: bool,
    pub is_simulation: bool,
    pub battery_band: BatteryBand,
    pub load_status: LoadStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesResponse {
    pub devices: Vec<BluetoothDevice>,
    pub is_scanning: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub device_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRequest {
    pub room_id: RoomId,
}

#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: RobotMode,
}

#[derive(Debug, Deserialize)]
pub struct SpeedRequest {
    pub speed: i32,
}

#[derive(Debug, Deserialize)]
pub struct ControlRequest {
    pub direction: ControlDirection,
}

#[derive(Debug, Deserialize)]
pub struct DisplayMessageRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChargingRequest {
    pub charging: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    pub enabled: bool,
}
