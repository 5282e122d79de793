//! metreg registry library entry.
//!
//! This crate owns the shared name -> metric directory with race-safe
//! create-or-get registration, the base-name builder on top of it, and the
//! strict YAML config that tunes both. It is consumed by the probe binary
//! (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod builder;
pub mod config;
pub mod registry;

pub use builder::MetricBuilder;
pub use registry::{new_shared_registry, MetricRegistry, SharedMetricRegistry};
