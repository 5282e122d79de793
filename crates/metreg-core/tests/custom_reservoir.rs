//! Pluggable reservoir tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use metreg_core::metric::{Histogram, Reservoir, ReservoirFactory, Timer};

/// Keeps only the largest value seen.
#[derive(Default)]
struct MaxOnly {
    max: Mutex<Option<i64>>,
}

impl Reservoir for MaxOnly {
    fn update(&self, value: i64) {
        let mut g = self.max.lock().unwrap();
        *g = Some(g.map_or(value, |m| m.max(value)));
    }

    fn size(&self) -> usize {
        usize::from(self.max.lock().unwrap().is_some())
    }

    fn values(&self) -> Vec<i64> {
        self.max.lock().unwrap().iter().copied().collect()
    }
}

#[test]
fn histogram_delegates_to_custom_reservoir() {
    let factory = ReservoirFactory::new(|| Box::new(MaxOnly::default()));
    let h = Histogram::from_factory(&factory);
    for v in [4, 9, 2] {
        h.update(v);
    }
    assert_eq!(h.count(), 3);
    assert_eq!(h.snapshot().values(), &[9]);
}

#[test]
fn factory_runs_once_per_metric() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    let factory = ReservoirFactory::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::new(MaxOnly::default())
    });

    let timer = Timer::from_factory(&factory);
    timer.update(Duration::from_nanos(10));
    timer.update(Duration::from_nanos(30));
    let _other = Histogram::from_factory(&factory);

    assert_eq!(builds.load(Ordering::SeqCst), 2);
    assert_eq!(timer.snapshot().max(), Some(30));
    assert_eq!(timer.count(), 2);
}
