//! Background discharge scheduler.
//!
//! The scheduler is the only continuously-running task in the core. On a
//! fixed interval it asks the room lifecycle manager to sweep rooms whose
//! scheduled discharge has elapsed. Reads elsewhere in the system are
//! side-effect free - no list or read path ever applies a discharge.
//!
//! Overlapping sweeps are safe: the per-room discharge is a conditional
//! write re-checked at commit time, so a room discharged by one cycle is
//! silently skipped by the next.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use medivault_persistence::core::RoomStore;

use crate::clock::Clock;
use crate::rooms::RoomLifecycleManager;

/// Periodically sweeps rooms with an elapsed scheduled discharge.
pub struct DischargeScheduler<S, C> {
    manager: Arc<RoomLifecycleManager<S, C>>,
    interval: Duration,
}

impl<S, C> DischargeScheduler<S, C>
where
    S: RoomStore + 'static,
    C: Clock + 'static,
{
    /// Creates a scheduler that sweeps every `interval`.
    pub fn new(manager: Arc<RoomLifecycleManager<S, C>>, interval: Duration) -> Self {
        Self { manager, interval }
    }

    /// Spawns the sweep loop onto the current runtime.
    ///
    /// The loop runs until the returned handle requests shutdown. A failed
    /// sweep pass is logged and the loop continues - the next tick retries
    /// from scratch.
    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(err) = self.manager.sweep().await {
                            warn!(error = %err, "Discharge sweep failed");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("Discharge scheduler stopped");
        });
        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle for stopping a spawned [`DischargeScheduler`].
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signals the loop to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}
