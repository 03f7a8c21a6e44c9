use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::sync::Mutex;
use std::time::Duration;

/// Time source for a console session.
///
/// `elapsed` is monotonic session time and is what timers are scheduled
/// against; `timestamp` is the wall-clock time stamped on log entries.
pub trait Clock: Send + Sync + Debug {
    fn elapsed(&self) -> Duration;
    fn timestamp(&self) -> DateTime<Utc>;
}

fn offset(origin: DateTime<Utc>, elapsed: Duration) -> DateTime<Utc> {
    origin + chrono::Duration::milliseconds(elapsed.as_millis() as i64)
}

/// Clock backed by `tokio::time`, so a paused runtime also pauses the session.
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin: tokio::time::Instant,
    wall_origin: DateTime<Utc>,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
            wall_origin: Utc::now(),
        }
    }

    /// Runtime instant corresponding to a session offset.
    pub fn instant_at(&self, at: Duration) -> tokio::time::Instant {
        self.origin + at
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        offset(self.wall_origin, self.elapsed())
    }
}

/// Hand-driven clock for deterministic tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    elapsed: Mutex<Duration>,
    wall_origin: DateTime<Utc>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            elapsed: Mutex::new(Duration::ZERO),
            wall_origin: Utc::now(),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += by;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn timestamp(&self) -> DateTime<Utc> {
        offset(self.wall_origin, self.elapsed())
    }
}
