use crate::robot::models::{MessageKind, RoomId};
use thiserror::Error;

/// Why a console command was refused. The display text is exactly what the
/// activity log shows to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Bluetooth not connected")]
    BluetoothNotConnected,
    #[error("Robot is charging")]
    Charging,
    #[error("Already in {}", .0.spoken())]
    AlreadyInRoom(RoomId),
}

impl Rejection {
    pub fn kind(&self) -> MessageKind {
        match self {
            Rejection::BluetoothNotConnected => MessageKind::Error,
            Rejection::Charging | Rejection::AlreadyInRoom(_) => MessageKind::Warning,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
