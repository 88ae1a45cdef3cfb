use std::sync::Arc;
use std::time::Duration;

use log::info;

use super::channel::{DeliveryChannel, FileSink};
use super::gate::{Arming, ReadinessGate};
use super::path::FileUrl;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs a one-shot task later on the loop that owns the gate. Must not block
/// the caller.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task);
}

/// The gate plus the grace-period policy around its drain.
///
/// Readiness arms the gate right away; the drain that opens it runs after
/// `grace_period`, giving the frontend time to finish building its views.
/// A file observed in between is delivered at once, flushing the queue ahead
/// of it, and the timed drain then has nothing left to do.
pub struct FileHandoff<C, S> {
    gate: Arc<ReadinessGate<C>>,
    scheduler: S,
    grace_period: Duration,
}

impl<C, S> FileHandoff<C, S>
where
    C: DeliveryChannel + 'static,
    S: Scheduler,
{
    pub fn new(scheduler: S, grace_period: Duration) -> Self {
        Self {
            gate: Arc::new(ReadinessGate::new()),
            scheduler,
            grace_period,
        }
    }

    pub fn gate(&self) -> &ReadinessGate<C> {
        &self.gate
    }

    pub fn observe_file(&self, file: FileUrl) {
        self.gate.observe_file(file);
    }

    /// Handles the frontend's readiness signal. Repeated signals are ignored.
    pub fn mark_ready(&self, channel: C) {
        match self.gate.arm(channel) {
            Arming::AlreadyReady => {}
            // Nothing to wait for.
            Arming::Armed { pending: 0 } => {
                self.gate.open();
            }
            Arming::Armed { .. } if self.grace_period.is_zero() => {
                self.gate.open();
            }
            Arming::Armed { pending } => {
                info!(
                    "Draining {} pending file(s) in {:?}",
                    pending, self.grace_period
                );
                let gate = Arc::clone(&self.gate);
                self.scheduler.schedule(
                    self.grace_period,
                    Box::new(move || {
                        gate.open();
                    }),
                );
            }
        }
    }
}

impl<C, S> FileSink for FileHandoff<C, S>
where
    C: DeliveryChannel + 'static,
    S: Scheduler,
{
    fn observe_file(&self, file: FileUrl) {
        FileHandoff::observe_file(self, file)
    }
}
