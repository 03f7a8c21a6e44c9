use super::clock::TokioClock;
use super::controller::RobotController;
use super::models::ConsoleSnapshot;
use crate::config::SessionConfig;
use std::sync::Arc;
use tokio::sync::{broadcast, Notify, RwLock};

/// Capacity of the snapshot channel; slow subscribers skip ahead
pub const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

/// Session-wide handle to the single controller.
///
/// Every mutation goes through the write lock, wakes the timer driver and
/// publishes a fresh snapshot to subscribers.
#[derive(Debug, Clone)]
pub struct SharedController {
    pub controller: Arc<RwLock<RobotController>>,
    pub clock: Arc<TokioClock>,
    pub snapshot_sender: broadcast::Sender<ConsoleSnapshot>,
    wake: Arc<Notify>,
}

impl SharedController {
    pub fn new(config: &SessionConfig) -> Self {
        let clock = Arc::new(TokioClock::new());
        let controller = RobotController::new(config, clock.clone());
        let (tx, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            controller: Arc::new(RwLock::new(controller)),
            clock,
            snapshot_sender: tx,
            wake: Arc::new(Notify::new()),
        }
    }

    /// Run a command against the controller and publish the result.
    pub async fn apply<R>(&self, command: impl FnOnce(&mut RobotController) -> R) -> R {
        let (result, snapshot) = {
            let mut controller = self.controller.write().await;
            let result = command(&mut controller);
            (result, controller.snapshot())
        };
        self.wake.notify_one();
        self.publish(snapshot);
        result
    }

    pub async fn query<R>(&self, query: impl FnOnce(&RobotController) -> R) -> R {
        let controller = self.controller.read().await;
        query(&controller)
    }

    pub async fn snapshot(&self) -> ConsoleSnapshot {
        self.controller.read().await.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleSnapshot> {
        self.snapshot_sender.subscribe()
    }

    /// Fire every due timer. Publishes only when something fired.
    pub async fn fire_due(&self) -> usize {
        let (fired, snapshot) = {
            let mut controller = self.controller.write().await;
            let fired = controller.fire_due();
            (fired, controller.snapshot())
        };
        if fired > 0 {
            self.publish(snapshot);
        }
        fired
    }

    fn publish(&self, snapshot: ConsoleSnapshot) {
        // No subscribers is fine
        let _ = self.snapshot_sender.send(snapshot);
    }
}

/// Background task that applies simulated completions when they fall due.
pub async fn run_timer_driver(shared: SharedController) {
    tracing::info!("Timer driver started");

    loop {
        let next = shared.controller.read().await.next_deadline();

        match next {
            Some(at) => {
                tokio::select! {
                    _ = tokio::time::sleep_until(shared.clock.instant_at(at)) => {
                        let fired = shared.fire_due().await;
                        tracing::debug!(fired, "Timers fired");
                    }
                    _ = shared.wake.notified() => {}
                }
            }
            None => shared.wake.notified().await,
        }
    }
}
