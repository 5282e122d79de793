//! Sampling reservoirs used by histograms and timers.
//!
//! Sampling strategy is pluggable through the `Reservoir` trait. The only
//! built-in strategy keeps a sliding window of the most recent values; other
//! strategies (decaying, HDR) are expected to come from outside this crate.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Default window for `ReservoirFactory::default()`.
pub const DEFAULT_WINDOW: usize = 1028;

/// Bounded store of observed values.
pub trait Reservoir: Send + Sync {
    fn update(&self, value: i64);
    /// Number of values currently retained.
    fn size(&self) -> usize;
    /// Copy of the retained values (order unspecified).
    fn values(&self) -> Vec<i64>;
}

/// Keeps the last `window` values in a ring buffer.
pub struct SlidingWindowReservoir {
    inner: Mutex<Ring>,
}

struct Ring {
    values: Vec<i64>,
    window: usize,
    next: usize,
}

impl SlidingWindowReservoir {
    /// `window` is clamped to at least 1.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            inner: Mutex::new(Ring {
                values: Vec::with_capacity(window),
                window,
                next: 0,
            }),
        }
    }
}

impl SlidingWindowReservoir {
    // Every write is a single slot store, so a poisoned ring is still consistent.
    fn ring(&self) -> MutexGuard<'_, Ring> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Reservoir for SlidingWindowReservoir {
    fn update(&self, value: i64) {
        let mut ring = self.ring();
        if ring.values.len() < ring.window {
            ring.values.push(value);
        } else {
            let i = ring.next;
            ring.values[i] = value;
        }
        ring.next = (ring.next + 1) % ring.window;
    }

    fn size(&self) -> usize {
        self.ring().values.len()
    }

    fn values(&self) -> Vec<i64> {
        self.ring().values.clone()
    }
}

/// Produces a fresh reservoir for each histogram or timer.
#[derive(Clone)]
pub struct ReservoirFactory {
    make: Arc<dyn Fn() -> Box<dyn Reservoir> + Send + Sync>,
}

impl ReservoirFactory {
    pub fn new<F>(make: F) -> Self
    where
        F: Fn() -> Box<dyn Reservoir> + Send + Sync + 'static,
    {
        Self { make: Arc::new(make) }
    }

    pub fn sliding_window(window: usize) -> Self {
        Self::new(move || Box::new(SlidingWindowReservoir::new(window)))
    }

    pub fn build(&self) -> Box<dyn Reservoir> {
        (self.make)()
    }
}

impl Default for ReservoirFactory {
    fn default() -> Self {
        Self::sliding_window(DEFAULT_WINDOW)
    }
}

impl fmt::Debug for ReservoirFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservoirFactory").finish_non_exhaustive()
    }
}
