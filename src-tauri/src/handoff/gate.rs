use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};

use super::channel::{DeliveryChannel, FileSink};
use super::path::FileUrl;
use super::queue::PendingQueue;

/// Where the gate is in its one-way `Waiting -> Armed -> Open` life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Waiting,
    /// Channel known, timed drain not run yet. The next observed file flushes
    /// the queue ahead of itself.
    Armed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arming {
    Armed { pending: usize },
    AlreadyReady,
}

enum Phase<C> {
    Waiting,
    Armed(C),
    Open(C),
}

struct GateState<C> {
    phase: Phase<C>,
    pending: PendingQueue,
}

/// Decides per file whether to deliver now or buffer, and owns the buffer.
///
/// A single mutex covers both the phase and the queue, and delivery happens
/// while it is held, so a drain and an immediate delivery can never interleave.
pub struct ReadinessGate<C> {
    state: Mutex<GateState<C>>,
}

impl<C: DeliveryChannel> Default for ReadinessGate<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: DeliveryChannel> ReadinessGate<C> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                phase: Phase::Waiting,
                pending: PendingQueue::new(),
            }),
        }
    }

    // A panic inside a channel must not strand the queue.
    fn lock(&self) -> MutexGuard<'_, GateState<C>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn readiness(&self) -> Readiness {
        match self.lock().phase {
            Phase::Waiting => Readiness::Waiting,
            Phase::Armed(_) => Readiness::Armed,
            Phase::Open(_) => Readiness::Open,
        }
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Delivers `file` as soon as a channel is known, after anything still
    /// queued. Before that it is appended to the queue.
    pub fn observe_file(&self, file: FileUrl) {
        let mut guard = self.lock();
        let state = &mut *guard;
        if matches!(state.phase, Phase::Armed(_)) {
            // Readiness already happened; older files must go out first.
            Self::drain(state);
        }
        if let Phase::Open(channel) = &state.phase {
            debug!("Delivering {} immediately", file);
            channel.deliver(&file);
            return;
        }
        state.pending.push(file);
        debug!("Queued file, queue size now {}", state.pending.len());
    }

    // Only the first call has any effect.
    pub fn arm(&self, channel: C) -> Arming {
        let mut state = self.lock();
        if !matches!(state.phase, Phase::Waiting) {
            debug!("Duplicate readiness signal ignored");
            return Arming::AlreadyReady;
        }
        state.phase = Phase::Armed(channel);
        let pending = state.pending.len();
        info!("Delivery channel ready, {} pending file(s)", pending);
        Arming::Armed { pending }
    }

    /// Opens an armed gate and drains the queue into the channel in FIFO
    /// order. Returns how many files were drained; zero if the gate was not
    /// armed.
    pub fn open(&self) -> usize {
        Self::drain(&mut self.lock())
    }

    fn drain(state: &mut GateState<C>) -> usize {
        let channel = match std::mem::replace(&mut state.phase, Phase::Waiting) {
            Phase::Armed(channel) => channel,
            other => {
                state.phase = other;
                return 0;
            }
        };
        let mut drained = 0;
        for file in state.pending.take() {
            debug!("Sending pending file: {}", file);
            channel.deliver(&file);
            drained += 1;
        }
        state.phase = Phase::Open(channel);
        if drained > 0 {
            info!("Drained {} pending file(s)", drained);
        }
        drained
    }

    #[cfg(test)]
    fn mark_ready(&self, channel: C) {
        if let Arming::Armed { .. } = self.arm(channel) {
            self.open();
        }
    }
}

impl<C: DeliveryChannel> FileSink for ReadinessGate<C> {
    fn observe_file(&self, file: FileUrl) {
        ReadinessGate::observe_file(self, file)
    }
}
