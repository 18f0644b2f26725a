//! Per-signal animation driver.
//!
//! Each trace runs its own little state machine:
//!
//! ```text
//! Idle --start()--> Running --stop()--> Stopped
//!                      ^                   |
//!                      +------start()------+
//! ```
//!
//! **Idle**: created, no tick scheduled. **Running**: a repeating tick is
//! scheduled; every call to [`SignalDriver::run_due`] executes the ticks
//! whose deadline has passed and re-schedules the next one. **Stopped**: the
//! pending tick is canceled; nothing runs until an explicit restart.
//!
//! The schedule is an explicit deadline stored in the state, not a
//! self-rescheduling callback chain: stopping clears the deadline (no leaked
//! ticks after teardown), and restarting replaces it (no duplicate
//! overlapping animations after re-initialization).
//!
//! All three drivers run on the one cooperative thread of the main loop;
//! their schedules are independent and uncoordinated beyond sharing the
//! vitals-supplied heart rate.

use std::time::Instant;

use crate::config::FRAME_TIME;
use crate::waveform::{SignalParams, WaveformEngine, WaveformKind};

/// Cap on ticks executed in one `run_due` call. After a long stall (window
/// dragged, system sleep) the schedule snaps to the present instead of
/// fast-forwarding the trace through the backlog.
const MAX_CATCHUP_TICKS: u32 = 5;

/// Scheduling state of one signal's animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    /// No surface bound yet; nothing scheduled.
    Idle,
    /// Scheduled; the next tick runs at the stored deadline.
    Running { next_tick: Instant },
    /// Explicitly canceled (view teardown).
    Stopped,
}

/// Animation driver for a single waveform trace. Owns the synthesis engine
/// and its tick schedule.
pub struct SignalDriver {
    engine: WaveformEngine,
    state: DriverState,
}

impl SignalDriver {
    /// Create an idle driver for the given signal.
    pub fn new(kind: WaveformKind) -> Self {
        Self {
            engine: WaveformEngine::new(kind),
            state: DriverState::Idle,
        }
    }

    /// Create an idle driver with an explicit engine seed (tests).
    pub fn with_seed(kind: WaveformKind, seed: u64) -> Self {
        Self {
            engine: WaveformEngine::with_seed(kind, seed),
            state: DriverState::Idle,
        }
    }

    /// Transition to Running with a fresh engine state. Any previously
    /// scheduled tick is replaced, so re-initializing never stacks a second
    /// animation on top of the first.
    pub fn start(&mut self, now: Instant) {
        self.engine.reset();
        self.state = DriverState::Running { next_tick: now };
    }

    /// Cancel the pending tick. No further ticks run until [`start`] is
    /// called again.
    ///
    /// [`start`]: SignalDriver::start
    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
    }

    /// Whether a tick is currently scheduled.
    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    /// Execute every tick whose deadline has passed and reschedule.
    ///
    /// Returns `true` when at least one tick ran, i.e. the trace advanced and
    /// should be redrawn. Idle and Stopped drivers do nothing.
    pub fn run_due(&mut self, now: Instant, params: &SignalParams) -> bool {
        let DriverState::Running { next_tick } = self.state else {
            return false;
        };

        let mut next = next_tick;
        let mut ticks = 0u32;
        while next <= now {
            self.engine.tick(params);
            ticks += 1;
            if ticks >= MAX_CATCHUP_TICKS {
                next = now + FRAME_TIME;
                break;
            }
            next += FRAME_TIME;
        }

        self.state = DriverState::Running { next_tick: next };
        ticks > 0
    }

    /// The synthesis engine, for rendering.
    pub fn engine_mut(&mut self) -> &mut WaveformEngine {
        &mut self.engine
    }

    /// The synthesis engine, read-only.
    #[cfg(test)]
    pub fn engine(&self) -> &WaveformEngine {
        &self.engine
    }
}
