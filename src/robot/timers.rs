use super::models::RoomId;
use std::collections::BTreeMap;
use std::time::Duration;

pub const SCAN_DELAY: Duration = Duration::from_millis(2000);
pub const BLUETOOTH_CONNECT_DELAY: Duration = Duration::from_millis(1500);
pub const WIFI_CONNECT_DELAY: Duration = Duration::from_millis(1000);
pub const TRAVEL_DELAY: Duration = Duration::from_millis(5000);
/// How long `task_completed` is shown before the robot reports idle again
pub const IDLE_REVERT_DELAY: Duration = Duration::from_millis(2000);

/// Deferred completion of a simulated operation.
///
/// Navigation actions carry the generation they were scheduled under; the
/// controller discards them once that generation has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    ScanComplete,
    BluetoothConnected,
    WifiConnected,
    Arrive { room: RoomId, generation: u64 },
    RevertToIdle { generation: u64 },
}

/// One-shot timers ordered by due time, ties broken by scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: BTreeMap<(Duration, u64), TimerAction>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, action: TimerAction) {
        self.pending.insert((due, self.next_seq), action);
        self.next_seq += 1;
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest timer whose due time is not after `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerAction)> {
        let (&(due, _), _) = self.pending.first_key_value()?;
        if due > now {
            return None;
        }
        self.pending.pop_first().map(|((due, _), action)| (due, action))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
