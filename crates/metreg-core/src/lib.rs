//! metreg core: metric names, metric variants, reservoirs, and the error type.
//!
//! This crate defines the value model shared by the registry and by any code
//! that records measurements. It carries no map or runtime dependencies so the
//! metric types can be used on their own.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed names and bad input surface as `MetricsError`, never as a crash
//! in the instrumented process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod name;

pub use error::{ErrorCode, MetricsError};
/// Shared result type.
pub use error::Result;
pub use metric::{
    Counter, Gauge, Histogram, Meter, Metric, MetricKind, RegisteredMetric, Reservoir,
    ReservoirFactory, SlidingWindowReservoir, Snapshot, Timer, TimerContext,
};
pub use name::MetricName;
