use super::activity_log::ActivityLog;
use super::clock::Clock;
use super::models::{
    BatteryBand, BluetoothDevice, ConnectOutcome, ConnectionStatus, ConsoleSnapshot,
    ControlDirection, LoadStatus, MessageKind, Room, RobotMode, RobotState, RobotStatus, RoomId,
    StatusMessage,
};
use super::rooms::ROOMS;
use super::timers::{
    TimerAction, TimerQueue, BLUETOOTH_CONNECT_DELAY, IDLE_REVERT_DELAY, SCAN_DELAY,
    TRAVEL_DELAY, WIFI_CONNECT_DELAY,
};
use crate::config::SessionConfig;
use crate::error::Rejection;
use std::sync::Arc;
use std::time::Duration;

pub const MIN_SPEED: u8 = 10;
pub const MAX_SPEED: u8 = 100;
pub const DEFAULT_SPEED: u8 = 50;
/// Longest text the robot's display accepts
pub const DISPLAY_MESSAGE_MAX_CHARS: usize = 100;

/// Clamp to the speed slider's range and snap to its 10 % steps.
pub fn normalize_speed(speed: i32) -> u8 {
    let clamped = speed.clamp(MIN_SPEED as i32, MAX_SPEED as i32);
    (((clamped + 5) / 10) * 10) as u8
}

/// Devices reported by every simulated Bluetooth scan.
pub fn mock_devices() -> Vec<BluetoothDevice> {
    vec![
        BluetoothDevice {
            id: "robot-001".to_string(),
            name: "HomeBot-001".to_string(),
            rssi: -45,
            is_robot: true,
        },
        BluetoothDevice {
            id: "device-002".to_string(),
            name: "Unknown Device".to_string(),
            rssi: -72,
            is_robot: false,
        },
        BluetoothDevice {
            id: "device-003".to_string(),
            name: "Speaker".to_string(),
            rssi: -58,
            is_robot: false,
        },
    ]
}

/// Owner of a console session: robot state, activity log, scan results and
/// the pending simulated operations.
///
/// Commands never fail from the caller's point of view. Their outcome is
/// visible through the state and the newest log entry. Delayed effects are
/// queued against the injected [`Clock`] and applied by [`fire_due`].
///
/// Navigation timers are tagged with a generation. Emergency stop, a stop
/// pulse, docking and a newer destination all bump it, which turns any
/// in-flight arrival into a no-op.
///
/// [`fire_due`]: RobotController::fire_due
#[derive(Debug)]
pub struct RobotController {
    state: RobotState,
    log: ActivityLog,
    devices: Vec<BluetoothDevice>,
    is_scanning: bool,
    is_simulation: bool,
    timers: TimerQueue,
    nav_generation: u64,
    bluetooth_outcome: ConnectOutcome,
    wifi_outcome: ConnectOutcome,
    clock: Arc<dyn Clock>,
}

impl RobotController {
    pub fn new(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        let state = RobotState {
            bluetooth_status: if config.bluetooth_connected {
                ConnectionStatus::Connected
            } else {
                ConnectionStatus::Disconnected
            },
            wifi_status: ConnectionStatus::Disconnected,
            current_room: config.initial_room,
            destination_room: None,
            battery_level: config.battery_level.min(100),
            signal_strength: config.signal_strength.min(100),
            mode: RobotMode::Auto,
            status: RobotStatus::Idle,
            speed: DEFAULT_SPEED,
            is_moving: false,
            is_charging: false,
            load_weight: 0.0,
            max_load_weight: config.max_load_weight,
            display_message: String::new(),
        };

        let mut controller = Self {
            state,
            log: ActivityLog::new(config.log_cap),
            devices: Vec::new(),
            is_scanning: false,
            is_simulation: config.simulation,
            timers: TimerQueue::new(),
            nav_generation: 0,
            bluetooth_outcome: config.bluetooth_outcome,
            wifi_outcome: config.wifi_outcome,
            clock,
        };
        controller.log(MessageKind::Info, "System initialized");
        controller
    }

    // --- queries ---

    pub fn state(&self) -> &RobotState {
        &self.state
    }

    /// Activity log, most recent first.
    pub fn messages(&self) -> Vec<StatusMessage> {
        self.log.entries().cloned().collect()
    }

    pub fn latest_message(&self) -> Option<&StatusMessage> {
        self.log.latest()
    }

    pub fn devices(&self) -> &[BluetoothDevice] {
        &self.devices
    }

    pub fn is_scanning(&self) -> bool {
        self.is_scanning
    }

    pub fn is_simulation(&self) -> bool {
        self.is_simulation
    }

    pub fn rooms(&self) -> &'static [Room] {
        &ROOMS
    }

    pub fn battery_band(&self) -> BatteryBand {
        BatteryBand::from_level(self.state.battery_level)
    }

    pub fn load_status(&self) -> LoadStatus {
        LoadStatus::from_weights(self.state.load_weight, self.state.max_load_weight)
    }

    /// Session time at which the next simulated operation completes.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            state: self.state.clone(),
            messages: self.messages(),
            devices: self.devices.clone(),
            is_scanning: self.is_scanning,
            is_simulation: self.is_simulation,
            battery_band: self.battery_band(),
            load_status: self.load_status(),
        }
    }

    // --- connection commands ---

    pub fn scan_for_devices(&mut self) {
        self.is_scanning = true;
        self.log(MessageKind::Info, "Scanning for devices...");
        self.schedule(SCAN_DELAY, TimerAction::ScanComplete);
        tracing::info!("Bluetooth scan started");
    }

    /// Any device id is accepted; the simulated link always targets the robot.
    pub fn connect_bluetooth(&mut self, device_id: &str) {
        self.state.bluetooth_status = ConnectionStatus::Connecting;
        self.log(MessageKind::Info, "Connecting to robot...");
        self.schedule(BLUETOOTH_CONNECT_DELAY, TimerAction::BluetoothConnected);
        tracing::info!(device_id = %device_id, "Bluetooth connection requested");
    }

    pub fn disconnect_bluetooth(&mut self) {
        self.state.bluetooth_status = ConnectionStatus::Disconnected;
        self.log(MessageKind::Info, "Bluetooth disconnected");
        tracing::info!("Bluetooth disconnected");
    }

    pub fn connect_wifi(&mut self) {
        self.state.wifi_status = ConnectionStatus::Connecting;
        self.log(MessageKind::Info, "Connecting to camera stream...");
        self.schedule(WIFI_CONNECT_DELAY, TimerAction::WifiConnected);
        tracing::info!("Camera stream connection requested");
    }

    pub fn disconnect_wifi(&mut self) {
        self.state.wifi_status = ConnectionStatus::Disconnected;
        self.log(MessageKind::Info, "Camera stream disconnected");
        tracing::info!("Camera stream disconnected");
    }

    pub fn set_bluetooth_outcome(&mut self, outcome: ConnectOutcome) {
        self.bluetooth_outcome = outcome;
    }

    pub fn set_wifi_outcome(&mut self, outcome: ConnectOutcome) {
        self.wifi_outcome = outcome;
    }

    // --- motion commands ---

    pub fn set_destination(&mut self, room: RoomId) {
        if let Err(rejection) = self.check_drive_allowed() {
            return self.reject("set_destination", rejection);
        }
        if self.state.current_room == Some(room) {
            return self.reject("set_destination", Rejection::AlreadyInRoom(room));
        }

        self.nav_generation += 1;
        self.state.destination_room = Some(room);
        self.state.status = RobotStatus::Moving;
        self.state.is_moving = true;
        self.log(MessageKind::Info, format!("Moving to {}", room.spoken()));
        self.schedule(
            TRAVEL_DELAY,
            TimerAction::Arrive {
                room,
                generation: self.nav_generation,
            },
        );
        tracing::info!(
            destination = %room,
            generation  = self.nav_generation,
            "Navigation started"
        );
    }

    pub fn set_mode(&mut self, mode: RobotMode) {
        if self.state.is_charging {
            return self.reject("set_mode", Rejection::Charging);
        }

        self.state.mode = mode;
        self.log(MessageKind::Info, format!("Switched to {mode} mode"));
        tracing::info!(mode = %mode, "Control mode changed");
    }

    pub fn set_speed(&mut self, speed: i32) {
        let normalized = normalize_speed(speed);
        if normalized as i32 != speed {
            tracing::debug!(requested = speed, applied = normalized, "Speed normalized");
        }
        self.state.speed = normalized;
    }

    /// One directional drive pulse. Only `Stop` is logged so a held button
    /// does not flood the feed.
    pub fn send_control(&mut self, direction: ControlDirection) {
        if let Err(rejection) = self.check_drive_allowed() {
            return self.reject("send_control", rejection);
        }

        match direction {
            ControlDirection::Stop => {
                self.cancel_navigation();
                self.state.is_moving = false;
                self.state.status = RobotStatus::Idle;
                self.log(MessageKind::Warning, "Robot stopped");
                tracing::info!("Robot stopped");
            }
            ControlDirection::Forward
            | ControlDirection::Backward
            | ControlDirection::Left
            | ControlDirection::Right => {
                self.state.is_moving = true;
                self.state.status = RobotStatus::Moving;
                tracing::trace!(?direction, "Drive pulse");
            }
        }
    }

    /// Always accepted, whatever the mode, status or pending timers.
    pub fn emergency_stop(&mut self) {
        let cancelled = self.state.destination_room;
        self.cancel_navigation();
        self.state.is_moving = false;
        self.state.status = RobotStatus::Idle;
        self.log(MessageKind::Warning, "EMERGENCY STOP activated");
        tracing::warn!(cancelled_destination = ?cancelled, "Emergency stop activated");
    }

    // --- robot display and simulated hardware ---

    pub fn set_display_message(&mut self, text: &str) {
        let message: String = text.trim().chars().take(DISPLAY_MESSAGE_MAX_CHARS).collect();
        let cleared = message.is_empty();
        self.state.display_message = message;

        if cleared {
            self.log(MessageKind::Info, "Display message cleared");
        } else {
            self.log(MessageKind::Info, "Display message updated");
        }
    }

    /// Docks or undocks the simulated robot. Docking aborts any navigation.
    pub fn set_charging(&mut self, charging: bool) {
        if self.state.is_charging == charging {
            return;
        }

        self.state.is_charging = charging;
        if charging {
            self.cancel_navigation();
            self.state.is_moving = false;
            self.state.status = RobotStatus::Charging;
            self.log(MessageKind::Info, "Charging started");
        } else {
            self.state.status = RobotStatus::Idle;
            self.log(MessageKind::Info, "Charging stopped");
        }
        tracing::info!(charging, "Charging state changed");
    }

    pub fn set_load_weight(&mut self, kg: f64) {
        let before = self.load_status();
        self.state.load_weight = if kg.is_finite() { kg.max(0.0) } else { 0.0 };

        let after = self.load_status();
        if after == LoadStatus::Overload && before != LoadStatus::Overload {
            self.log(MessageKind::Warning, "Load exceeds capacity");
            tracing::warn!(
                load_kg = self.state.load_weight,
                max_kg  = self.state.max_load_weight,
                "Payload over capacity"
            );
        }
    }

    pub fn set_simulation(&mut self, enabled: bool) {
        if self.is_simulation == enabled {
            return;
        }
        self.is_simulation = enabled;
        if enabled {
            self.log(MessageKind::Info, "Simulation mode enabled");
        } else {
            self.log(MessageKind::Info, "Simulation mode disabled");
        }
    }

    // --- timers ---

    /// Apply every simulated completion that is due at the current clock
    /// time. Returns how many fired.
    pub fn fire_due(&mut self) -> usize {
        let now = self.clock.elapsed();
        let mut fired = 0;
        while let Some((due, action)) = self.timers.pop_due(now) {
            self.apply_timer(due, action);
            fired += 1;
        }
        fired
    }

    fn apply_timer(&mut self, due: Duration, action: TimerAction) {
        match action {
            TimerAction::ScanComplete => {
                self.devices = mock_devices();
                self.is_scanning = false;
                let found = self.devices.len();
                self.log(MessageKind::Success, format!("Found {found} devices"));
                tracing::info!(found, "Bluetooth scan finished");
            }
            TimerAction::BluetoothConnected => match self.bluetooth_outcome {
                ConnectOutcome::Succeed => {
                    self.state.bluetooth_status = ConnectionStatus::Connected;
                    self.log(MessageKind::Success, "Bluetooth connected successfully");
                    tracing::info!("Bluetooth connected");
                }
                ConnectOutcome::Fail => {
                    self.state.bluetooth_status = ConnectionStatus::Error;
                    self.log(MessageKind::Error, "Bluetooth connection failed");
                    tracing::error!("Simulated Bluetooth connection failure");
                }
            },
            TimerAction::WifiConnected => match self.wifi_outcome {
                ConnectOutcome::Succeed => {
                    self.state.wifi_status = ConnectionStatus::Connected;
                    self.log(MessageKind::Success, "Camera stream connected");
                    tracing::info!("Camera stream connected");
                }
                ConnectOutcome::Fail => {
                    self.state.wifi_status = ConnectionStatus::Error;
                    self.log(MessageKind::Error, "Camera stream connection failed");
                    tracing::error!("Simulated camera stream failure");
                }
            },
            TimerAction::Arrive { room, generation } => {
                if generation != self.nav_generation {
                    tracing::debug!(destination = %room, generation, "Discarding stale arrival");
                    return;
                }

                self.state.current_room = Some(room);
                self.state.destination_room = None;
                self.state.status = RobotStatus::TaskCompleted;
                self.state.is_moving = false;
                self.log(MessageKind::Success, "Task completed successfully");
                self.timers
                    .schedule(due + IDLE_REVERT_DELAY, TimerAction::RevertToIdle { generation });
                tracing::info!(room = %room, "Arrived at destination");
            }
            TimerAction::RevertToIdle { generation } => {
                if generation == self.nav_generation
                    && self.state.status == RobotStatus::TaskCompleted
                {
                    self.state.status = RobotStatus::Idle;
                }
            }
        }
    }

    // --- helpers ---

    fn check_drive_allowed(&self) -> Result<(), Rejection> {
        if self.state.is_charging {
            return Err(Rejection::Charging);
        }
        if self.state.bluetooth_status != ConnectionStatus::Connected {
            return Err(Rejection::BluetoothNotConnected);
        }
        Ok(())
    }

    fn cancel_navigation(&mut self) {
        self.nav_generation += 1;
        self.state.destination_room = None;
    }

    fn schedule(&mut self, delay: Duration, action: TimerAction) {
        let due = self.clock.elapsed() + delay;
        self.timers.schedule(due, action);
    }

    fn reject(&mut self, command: &'static str, rejection: Rejection) {
        tracing::warn!(command, reason = %rejection, "Command rejected");
        self.log(rejection.kind(), rejection.to_string());
    }

    fn log(&mut self, kind: MessageKind, message: impl Into<String>) {
        let timestamp = self.clock.timestamp();
        self.log.push(kind, message, timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_speed() {
        assert_eq!(normalize_speed(50), 50);
        assert_eq!(normalize_speed(0), 10);
        assert_eq!(normalize_speed(-30), 10);
        assert_eq!(normalize_speed(250), 100);
        assert_eq!(normalize_speed(44), 40);
        assert_eq!(normalize_speed(45), 50);
        assert_eq!(normalize_speed(95), 100);
    }

    #[test]
    fn test_mock_devices_have_one_robot() {
        let devices = mock_devices();
        assert_eq!(devices.len(), 3);
        assert_eq!(devices.iter().filter(|d| d.is_robot).count(), 1);
        let rssi: Vec<i16> = devices.iter().map(|d| d.rssi).collect();
        assert_eq!(rssi, vec![-45, -72, -58]);
    }
}
