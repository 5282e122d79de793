//! Name-keyed metric registry with race-safe create-or-get.
//!
//! Entries live in a `DashMap<String, Metric>` keyed by the rendered
//! `MetricName`. Registration runs in two steps:
//! - fast path: look the key up; a hit is validated against the requested
//!   kind and returned without calling the factory
//! - slow path: build a candidate with no map lock held, then insert it only
//!   if the key is still vacant. A caller that loses the race drops its
//!   candidate and validates the winner instead.
//!
//! At most one metric is ever published per key, and its kind never changes
//! while it stays registered.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use metreg_core::error::{MetricsError, Result};
use metreg_core::metric::{
    Counter, Gauge, Histogram, Meter, Metric, RegisteredMetric, ReservoirFactory, Timer,
};
use metreg_core::name::MetricName;

use crate::builder::MetricBuilder;
use crate::config::RegistryConfig;

/// Shared directory of metrics.
///
/// Construct one explicitly and pass it around (usually as
/// `SharedMetricRegistry`); there is no process-global instance.
#[derive(Debug, Default)]
pub struct MetricRegistry {
    metrics: DashMap<String, Metric>,
    reservoir: ReservoirFactory,
    namespace: Option<MetricName>,
}

impl MetricRegistry {
    /// Registry with the default sliding-window reservoir and no namespace.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reservoir(reservoir: ReservoirFactory) -> Self {
        Self {
            metrics: DashMap::new(),
            reservoir,
            namespace: None,
        }
    }

    /// Build from validated config.
    pub fn from_config(cfg: &RegistryConfig) -> Result<Self> {
        cfg.validate()?;
        let namespace = cfg
            .registry
            .namespace
            .as_deref()
            .map(str::parse::<MetricName>)
            .transpose()?;
        Ok(Self {
            metrics: DashMap::new(),
            reservoir: cfg.registry.reservoir.factory(),
            namespace,
        })
    }

    /// Return the metric under `name`, creating it with `factory` on first use.
    ///
    /// Fails with `MetricsError::TypeConflict` when `name` is already taken by
    /// a different kind. `factory` is not called when the name already exists
    /// (barring a concurrent first registration) and must not register metrics
    /// itself.
    pub fn get_or_create<M, F>(&self, name: &MetricName, factory: F) -> Result<Arc<M>>
    where
        M: RegisteredMetric,
        F: FnOnce() -> M,
    {
        self.try_get_or_create(name, || Ok::<_, MetricsError>(factory()))
    }

    /// Like `get_or_create`, but the factory may fail. Its error is returned
    /// as-is and nothing is registered.
    pub fn try_get_or_create<M, E, F>(
        &self,
        name: &MetricName,
        factory: F,
    ) -> std::result::Result<Arc<M>, E>
    where
        M: RegisteredMetric,
        E: From<MetricsError>,
        F: FnOnce() -> std::result::Result<M, E>,
    {
        if let Some(existing) = self.metrics.get(name.key()) {
            return Ok(expect_kind::<M>(name, existing.value())?);
        }

        let candidate = Arc::new(factory()?);

        match self.metrics.entry(name.key().to_string()) {
            Entry::Occupied(winner) => {
                tracing::trace!(metric = %name, kind = %M::KIND, "lost registration race; candidate discarded");
                Ok(expect_kind::<M>(name, winner.get())?)
            }
            Entry::Vacant(slot) => {
                slot.insert(M::into_metric(Arc::clone(&candidate)));
                tracing::debug!(metric = %name, kind = %M::KIND, "metric registered");
                Ok(candidate)
            }
        }
    }

    pub fn counter(&self, name: &MetricName) -> Result<Arc<Counter>> {
        self.get_or_create(name, Counter::new)
    }

    pub fn gauge(&self, name: &MetricName) -> Result<Arc<Gauge>> {
        self.get_or_create(name, Gauge::new)
    }

    pub fn meter(&self, name: &MetricName) -> Result<Arc<Meter>> {
        self.get_or_create(name, Meter::new)
    }

    /// Histogram backed by the registry's default reservoir.
    pub fn histogram(&self, name: &MetricName) -> Result<Arc<Histogram>> {
        self.histogram_with(name, &self.reservoir)
    }

    /// Histogram backed by `reservoir` (only used if the name is new).
    pub fn histogram_with(
        &self,
        name: &MetricName,
        reservoir: &ReservoirFactory,
    ) -> Result<Arc<Histogram>> {
        self.get_or_create(name, || Histogram::from_factory(reservoir))
    }

    /// Timer backed by the registry's default reservoir.
    pub fn timer(&self, name: &MetricName) -> Result<Arc<Timer>> {
        self.timer_with(name, &self.reservoir)
    }

    pub fn timer_with(&self, name: &MetricName, reservoir: &ReservoirFactory) -> Result<Arc<Timer>> {
        self.get_or_create(name, || Timer::from_factory(reservoir))
    }

    /// Existing metric under `name`, if any.
    pub fn get(&self, name: &MetricName) -> Option<Metric> {
        self.metrics.get(name.key()).map(|r| r.value().clone())
    }

    pub fn contains(&self, name: &MetricName) -> bool {
        self.metrics.contains_key(name.key())
    }

    /// Unregister `name`. Callers still holding the instance keep using it;
    /// the next registration under the same name creates a fresh one.
    pub fn remove(&self, name: &MetricName) -> Option<Metric> {
        let removed = self.metrics.remove(name.key()).map(|(_, m)| m);
        if let Some(m) = &removed {
            tracing::debug!(metric = %name, kind = %m.kind(), "metric removed");
        }
        removed
    }

    /// Registered keys, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.metrics.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// All entries sorted by key, for reporters that walk the registry.
    pub fn metrics(&self) -> Vec<(String, Metric)> {
        let mut out: Vec<(String, Metric)> = self
            .metrics
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn reservoir_factory(&self) -> &ReservoirFactory {
        &self.reservoir
    }

    pub fn namespace(&self) -> Option<&MetricName> {
        self.namespace.as_ref()
    }

    /// Builder rooted at `base`, prefixed with the registry namespace.
    pub fn builder(self: &Arc<Self>, base: MetricName) -> MetricBuilder {
        MetricBuilder::new(Arc::clone(self), base)
    }
}

fn expect_kind<M: RegisteredMetric>(name: &MetricName, existing: &Metric) -> Result<Arc<M>> {
    M::from_metric(existing).ok_or_else(|| {
        tracing::warn!(
            metric = %name,
            existing = %existing.kind(),
            requested = %M::KIND,
            "metric type conflict"
        );
        MetricsError::TypeConflict {
            name: name.key().to_string(),
            existing: existing.kind(),
            requested: M::KIND,
        }
    })
}

/// Shared registry handle.
pub type SharedMetricRegistry = Arc<MetricRegistry>;

/// Create a new shared registry with defaults.
pub fn new_shared_registry() -> SharedMetricRegistry {
    Arc::new(MetricRegistry::new())
}
