use crate::error::ConfigError;
use crate::robot::activity_log::DEFAULT_LOG_CAP;
use crate::robot::models::{ConnectOutcome, RoomId};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: String,
    pub session: SessionConfig,
}

/// Seed values for a console session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub simulation: bool,
    pub initial_room: Option<RoomId>,
    pub battery_level: u8,
    pub signal_strength: u8,
    pub max_load_weight: f64,
    pub bluetooth_connected: bool,
    pub log_cap: usize,
    pub bluetooth_outcome: ConnectOutcome,
    pub wifi_outcome: ConnectOutcome,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            simulation: true,
            initial_room: Some(RoomId::LivingRoom),
            battery_level: 85,
            signal_strength: 75,
            max_load_weight: 10.0,
            bluetooth_connected: true,
            log_cap: DEFAULT_LOG_CAP,
            bluetooth_outcome: ConnectOutcome::Succeed,
            wifi_outcome: ConnectOutcome::Succeed,
        }
    }
}

fn var_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

fn outcome(fail: bool) -> ConnectOutcome {
    if fail {
        ConnectOutcome::Fail
    } else {
        ConnectOutcome::Succeed
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = SessionConfig::default();

        let initial_room = match env::var("CONSOLE_INITIAL_ROOM") {
            Ok(value) if value.trim().is_empty() || value.trim() == "none" => None,
            Ok(value) => Some(RoomId::parse(value.trim()).ok_or(ConfigError::Invalid {
                key: "CONSOLE_INITIAL_ROOM",
                value,
            })?),
            Err(_) => defaults.initial_room,
        };

        let max_load_weight: f64 = var_or("CONSOLE_MAX_LOAD_KG", defaults.max_load_weight)?;
        if !(max_load_weight.is_finite() && max_load_weight > 0.0) {
            return Err(ConfigError::Invalid {
                key: "CONSOLE_MAX_LOAD_KG",
                value: max_load_weight.to_string(),
            });
        }

        Ok(Config {
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:3003".to_string()),
            session: SessionConfig {
                simulation: var_or("CONSOLE_SIMULATION", defaults.simulation)?,
                initial_room,
                battery_level: var_or::<u8>("CONSOLE_BATTERY", defaults.battery_level)?.min(100),
                signal_strength: var_or::<u8>("CONSOLE_SIGNAL", defaults.signal_strength)?.min(100),
                max_load_weight,
                bluetooth_connected: var_or(
                    "CONSOLE_BLUETOOTH_CONNECTED",
                    defaults.bluetooth_connected,
                )?,
                log_cap: var_or("CONSOLE_LOG_CAP", defaults.log_cap)?,
                bluetooth_outcome: outcome(var_or("CONSOLE_FAIL_BLUETOOTH", false)?),
                wifi_outcome: outcome(var_or("CONSOLE_FAIL_WIFI", false)?),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_or_falls_back_to_default() {
        let value: u8 = var_or("ROBOT_CONSOLE_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_var_or_rejects_garbage() {
        env::set_var("ROBOT_CONSOLE_TEST_BAD_BATTERY", "lots");
        let result = var_or::<u8>("ROBOT_CONSOLE_TEST_BAD_BATTERY", 85);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "ROBOT_CONSOLE_TEST_BAD_BATTERY", .. })
        ));
    }

    #[test]
    fn test_var_or_parses_bool() {
        env::set_var("ROBOT_CONSOLE_TEST_FLAG", " false ");
        assert!(!var_or("ROBOT_CONSOLE_TEST_FLAG", true).unwrap());
    }

    #[test]
    fn test_outcome_flag() {
        assert_eq!(outcome(true), ConnectOutcome::Fail);
        assert_eq!(outcome(false), ConnectOutcome::Succeed);
    }
}
