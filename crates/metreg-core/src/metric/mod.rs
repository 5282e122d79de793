//! Metric variants and the tagged `Metric` value stored by the registry.
//!
//! Every concrete variant implements `RegisteredMetric`, which ties it to a
//! `MetricKind` tag and converts between `Arc<Self>` and `Metric`. The
//! registry uses that pair to validate an existing entry against the kind a
//! caller asked for, so no runtime type inspection is needed.

mod counter;
mod gauge;
mod histogram;
mod meter;
mod reservoir;
mod timer;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{Histogram, Snapshot};
pub use meter::Meter;
pub use reservoir::{Reservoir, ReservoirFactory, SlidingWindowReservoir};
pub use timer::{Timer, TimerContext};

/// Variant tag of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Histogram,
    Timer,
    Gauge,
    Meter,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Histogram => "histogram",
            MetricKind::Timer => "timer",
            MetricKind::Gauge => "gauge",
            MetricKind::Meter => "meter",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered metric. Cloning shares the underlying instance.
#[derive(Debug, Clone)]
pub enum Metric {
    Counter(Arc<Counter>),
    Histogram(Arc<Histogram>),
    Timer(Arc<Timer>),
    Gauge(Arc<Gauge>),
    Meter(Arc<Meter>),
}

impl Metric {
    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Counter(_) => MetricKind::Counter,
            Metric::Histogram(_) => MetricKind::Histogram,
            Metric::Timer(_) => MetricKind::Timer,
            Metric::Gauge(_) => MetricKind::Gauge,
            Metric::Meter(_) => MetricKind::Meter,
        }
    }

    /// True when both values point at the same instance.
    pub fn ptr_eq(&self, other: &Metric) -> bool {
        match (self, other) {
            (Metric::Counter(a), Metric::Counter(b)) => Arc::ptr_eq(a, b),
            (Metric::Histogram(a), Metric::Histogram(b)) => Arc::ptr_eq(a, b),
            (Metric::Timer(a), Metric::Timer(b)) => Arc::ptr_eq(a, b),
            (Metric::Gauge(a), Metric::Gauge(b)) => Arc::ptr_eq(a, b),
            (Metric::Meter(a), Metric::Meter(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A concrete metric type that can live in the registry.
pub trait RegisteredMetric: Send + Sync + Sized + 'static {
    /// Tag this type is stored under.
    const KIND: MetricKind;

    fn into_metric(this: Arc<Self>) -> Metric;

    /// Returns the instance if `metric` holds this variant.
    fn from_metric(metric: &Metric) -> Option<Arc<Self>>;
}

macro_rules! registered_metric {
    ($ty:ident) => {
        impl RegisteredMetric for $ty {
            const KIND: MetricKind = MetricKind::$ty;

            fn into_metric(this: Arc<Self>) -> Metric {
                Metric::$ty(this)
            }

            fn from_metric(metric: &Metric) -> Option<Arc<Self>> {
                match metric {
                    Metric::$ty(m) => Some(Arc::clone(m)),
                    _ => None,
                }
            }
        }

        impl From<Arc<$ty>> for Metric {
            fn from(m: Arc<$ty>) -> Self {
                Metric::$ty(m)
            }
        }
    };
}

registered_metric!(Counter);
registered_metric!(Histogram);
registered_metric!(Timer);
registered_metric!(Gauge);
registered_metric!(Meter);
