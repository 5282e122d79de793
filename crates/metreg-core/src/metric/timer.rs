use std::time::{Duration, Instant};

use super::histogram::{Histogram, Snapshot};
use super::meter::Meter;
use super::reservoir::{Reservoir, ReservoirFactory};

/// Duration histogram (nanoseconds) plus a meter of timed events.
#[derive(Debug)]
pub struct Timer {
    durations: Histogram,
    rate: Meter,
}

impl Timer {
    pub fn new(reservoir: Box<dyn Reservoir>) -> Self {
        Self {
            durations: Histogram::new(reservoir),
            rate: Meter::new(),
        }
    }

    pub fn from_factory(factory: &ReservoirFactory) -> Self {
        Self::new(factory.build())
    }

    pub fn update(&self, elapsed: Duration) {
        let nanos = i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX);
        self.durations.update(nanos);
        self.rate.mark();
    }

    /// Run `f` and record how long it took.
    pub fn time<T>(&self, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let out = f();
        self.update(started.elapsed());
        out
    }

    /// Start a timing context; the duration is recorded on `stop` or drop.
    pub fn start(&self) -> TimerContext<'_> {
        TimerContext {
            timer: self,
            started: Some(Instant::now()),
        }
    }

    pub fn count(&self) -> u64 {
        self.rate.count()
    }

    pub fn mean_rate(&self) -> f64 {
        self.rate.mean_rate()
    }

    /// Snapshot of recorded durations in nanoseconds.
    pub fn snapshot(&self) -> Snapshot {
        self.durations.snapshot()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::from_factory(&ReservoirFactory::default())
    }
}

/// Guard returned by `Timer::start`. Records exactly once.
#[must_use = "dropping the context immediately records a near-zero duration"]
pub struct TimerContext<'a> {
    timer: &'a Timer,
    started: Option<Instant>,
}

impl TimerContext<'_> {
    /// Record and return the elapsed time.
    pub fn stop(mut self) -> Duration {
        self.record().unwrap_or_default()
    }

    fn record(&mut self) -> Option<Duration> {
        let elapsed = self.started.take()?.elapsed();
        self.timer.update(elapsed);
        Some(elapsed)
    }
}

impl Drop for TimerContext<'_> {
    fn drop(&mut self) {
        self.record();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_records_closure() {
        let t = Timer::default();
        let out = t.time(|| 40 + 2);
        assert_eq!(out, 42);
        assert_eq!(t.count(), 1);
        assert_eq!(t.snapshot().size(), 1);
    }

    #[test]
    fn context_records_once() {
        let t = Timer::default();
        let ctx = t.start();
        let elapsed = ctx.stop();
        assert_eq!(t.count(), 1);
        assert!(elapsed <= Duration::from_secs(60));

        {
            let _ctx = t.start();
        }
        assert_eq!(t.count(), 2);
    }

    #[test]
    fn update_stores_nanoseconds() {
        let t = Timer::default();
        t.update(Duration::from_micros(3));
        assert_eq!(t.snapshot().values(), &[3_000]);
    }
}
