/*!
 * Translation unit identifiers.
 *
 * An id is `{4-digit random}-{unix seconds}-{counter}`. The counter makes ids
 * unique within one document; the random part and the timestamp only serve
 * to tell documents apart. Both are injectable so tests get fixed ids.
 */

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Source of wall-clock time for unit ids
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> i64;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> i64 {
        self.0
    }
}

/// Per-document id generator; the counter starts at 1
pub struct UnitIdGenerator {
    rng: Box<dyn RngCore + Send>,
    clock: Arc<dyn Clock>,
    counter: u64,
}

impl Default for UnitIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitIdGenerator {
    /// OS-seeded randomness and the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// OS-seeded randomness and the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_sources(Box::new(StdRng::from_os_rng()), clock)
    }

    pub fn with_sources(rng: Box<dyn RngCore + Send>, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng,
            clock,
            counter: 0,
        }
    }

    /// Seeded randomness, for reproducible ids
    pub fn seeded(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self::with_sources(Box::new(StdRng::seed_from_u64(seed)), clock)
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.counter
    }

    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        let random = self.rng.next_u32() % 10_000;
        format!("{:04}-{}-{}", random, self.clock.unix_seconds(), self.counter)
    }
}
