pub mod activity_log;
pub mod clock;
pub mod controller;
pub mod models;
pub mod rooms;
pub mod routes;
pub mod state;
pub mod timers;

pub use controller::RobotController;
pub use state::{run_timer_driver, SharedController};
