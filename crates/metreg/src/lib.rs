//! Top-level facade crate for metreg.
//!
//! Re-exports the value model and the registry so users can depend on a single crate.

pub mod core {
    pub use metreg_core::*;
}

pub mod registry {
    pub use metreg_registry::*;
}

pub use metreg_core::{Metric, MetricKind, MetricName, MetricsError, Result};
pub use metreg_registry::{new_shared_registry, MetricBuilder, MetricRegistry, SharedMetricRegistry};
