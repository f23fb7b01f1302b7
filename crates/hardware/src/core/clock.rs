//! Machine Clock.
//!
//! This module implements the repeating timer that drives the tick loop. It provides:
//! 1. **Scheduling:** Fixed-period deadlines; a late wake-up skips the missed
//!    periods instead of firing a burst of ticks.
//! 2. **Cancellation:** A shared run flag. A stop request, whether from the
//!    machine itself or from a [`ClockHandle`] on another thread, is observed
//!    before the next tick is dispatched.
//! 3. **Restart:** A stopped clock may be started again; scheduling restarts
//!    one full period after `start`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

/// Fixed-period clock owned by a machine.
#[derive(Debug)]
pub struct Clock {
    interval: Duration,
    running: Arc<AtomicBool>,
    next_deadline: Option<Instant>,
}

/// Cloneable handle that can stop a clock from anywhere.
#[derive(Clone, Debug)]
pub struct ClockHandle {
    running: Arc<AtomicBool>,
}

impl Clock {
    /// Creates a stopped clock with the given period.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: Arc::new(AtomicBool::new(false)),
            next_deadline: None,
        }
    }

    /// Returns the tick period.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts the clock. The first tick is due one period from now.
    pub fn start(&mut self) {
        self.next_deadline = Some(Instant::now() + self.interval);
        self.running.store(true, Ordering::SeqCst);
    }

    /// Stops the clock. Stopping a stopped clock does nothing.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Returns true while the clock is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Returns a handle sharing this clock's run flag.
    pub fn handle(&self) -> ClockHandle {
        ClockHandle {
            running: Arc::clone(&self.running),
        }
    }

    /// Blocks until the next tick is due.
    ///
    /// # Returns
    ///
    /// `true` if a tick should be dispatched now, `false` if the clock was
    /// stopped before or while waiting.
    pub fn wait_for_tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            thread::sleep(deadline - now);
        }

        let now = Instant::now();
        let mut next = deadline + self.interval;
        if self.interval.is_zero() {
            next = now;
        } else {
            let mut skipped = 0_u32;
            while next <= now {
                next += self.interval;
                skipped = skipped.saturating_add(1);
            }
            if skipped > 0 {
                trace!(skipped, "clock fell behind; skipping missed periods");
            }
        }
        self.next_deadline = Some(next);

        self.is_running()
    }
}

impl ClockHandle {
    /// Stops the clock this handle belongs to. Idempotent.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Returns true while the clock is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
