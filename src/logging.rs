// Logging initialisation.
//
// Writes structured logs to both stdout and `./logs/console.log`.
//
// The log level is controlled by the `RUST_LOG` environment variable
// (defaults to `info`, with HTTP plumbing crates held at `warn`).
//
// To follow every simulated timer:  `RUST_LOG=robot_console=debug`
// To see individual drive pulses:   `RUST_LOG=robot_console::robot=trace`

use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,hyper=warn,tower=warn,tower_http=warn";

// Initialise the global tracing subscriber.
//
// Returns a [`WorkerGuard`] that must be kept alive for the whole session.
// Dropping it early loses buffered log lines.
pub fn init() -> non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never("./logs", "console.log");
    let (file_writer, guard) = non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Stdout layer – colourised for terminals.
    let stdout_layer = fmt::layer().with_target(true).with_ansi(true);

    // File layer – plain text (no ANSI escape codes).
    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
