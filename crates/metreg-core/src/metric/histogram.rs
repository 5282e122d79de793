use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::reservoir::{Reservoir, ReservoirFactory};

/// Distribution of values, sampled through a reservoir.
pub struct Histogram {
    count: AtomicU64,
    reservoir: Box<dyn Reservoir>,
}

impl Histogram {
    pub fn new(reservoir: Box<dyn Reservoir>) -> Self {
        Self {
            count: AtomicU64::new(0),
            reservoir,
        }
    }

    pub fn from_factory(factory: &ReservoirFactory) -> Self {
        Self::new(factory.build())
    }

    pub fn update(&self, value: i64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.reservoir.update(value);
    }

    /// Total number of updates, including values the reservoir no longer holds.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.reservoir.values())
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::from_factory(&ReservoirFactory::default())
    }
}

impl fmt::Debug for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Histogram")
            .field("count", &self.count())
            .field("retained", &self.reservoir.size())
            .finish()
    }
}

/// Sorted copy of the values a reservoir held at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    values: Vec<i64>,
}

impl Snapshot {
    pub fn new(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        Self { values }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn min(&self) -> Option<i64> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<i64> {
        self.values.last().copied()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        Some(sum / self.values.len() as f64)
    }
}
