//! Time sources injected into the shell.
//!
//! Components never read time themselves; the shell samples a `Clock` and
//! passes explicit timestamps down, so hover delays and relative times stay
//! deterministic under test.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub trait Clock {
    /// Milliseconds on a monotonic timeline. Used for hover delays.
    fn monotonic_ms(&self) -> u64;

    /// Unix epoch milliseconds. Used for relative time display.
    fn wall_ms(&self) -> i64;
}

/// Process clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started_at: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn monotonic_ms(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn wall_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Hand-driven clock. Clones share the same timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    monotonic: Rc<Cell<u64>>,
    wall: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(wall_ms: i64) -> Self {
        Self {
            monotonic: Rc::new(Cell::new(0)),
            wall: Rc::new(Cell::new(wall_ms)),
        }
    }

    /// Moves both timelines forward.
    pub fn advance(&self, delta_ms: u64) {
        self.monotonic
            .set(self.monotonic.get().saturating_add(delta_ms));
        let wall_delta = i64::try_from(delta_ms).unwrap_or(i64::MAX);
        self.wall.set(self.wall.get().saturating_add(wall_delta));
    }
}

impl Clock for ManualClock {
    fn monotonic_ms(&self) -> u64 {
        self.monotonic.get()
    }

    fn wall_ms(&self) -> i64 {
        self.wall.get()
    }
}
