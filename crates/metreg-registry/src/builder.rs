//! Base-name builder over a shared registry.
//!
//! A component keeps one `MetricBuilder` rooted at its own name (often its
//! type path) and asks it for metrics by short name:
//!
//! ```ignore
//! let metrics = MetricBuilder::for_type::<OrderService>(registry.clone());
//! let placed = metrics.counter("placed")?;        // app.OrderService.placed
//! let latency = metrics.timer_scoped("submit", "v2")?; // ...submit.v2
//! ```

use std::sync::Arc;

use metreg_core::error::Result;
use metreg_core::metric::{Counter, Gauge, Histogram, Meter, Timer};
use metreg_core::name::MetricName;

use crate::registry::SharedMetricRegistry;

#[derive(Debug, Clone)]
pub struct MetricBuilder {
    base: MetricName,
    registry: SharedMetricRegistry,
}

impl MetricBuilder {
    /// Builder rooted at `base`. The registry namespace, if any, is prepended.
    /// A scope on `base` becomes a plain segment, so per-metric scopes never
    /// replace it.
    pub fn new(registry: SharedMetricRegistry, base: MetricName) -> Self {
        let base = base.append(base.scope()).without_scope();
        let base = match registry.namespace() {
            Some(ns) => ns.append(base.segments()),
            None => base,
        };
        Self { base, registry }
    }

    /// Builder rooted at the type path of `T`.
    pub fn for_type<T: ?Sized>(registry: SharedMetricRegistry) -> Self {
        Self::new(registry, MetricName::of_type::<T>())
    }

    pub fn base_name(&self) -> &MetricName {
        &self.base
    }

    pub fn registry(&self) -> &SharedMetricRegistry {
        &self.registry
    }

    /// Full name for `name` (dotted, relative to the base) and optional scope.
    /// Fails with `InvalidName` when `name` has no non-blank segment.
    pub fn name(&self, name: &str, scope: Option<&str>) -> Result<MetricName> {
        let relative: MetricName = name.parse()?;
        let full = self.base.append(relative.segments());
        Ok(match scope {
            Some(s) => full.with_scope(s),
            None => full,
        })
    }

    pub fn counter(&self, name: &str) -> Result<Arc<Counter>> {
        self.registry.counter(&self.name(name, None)?)
    }

    pub fn counter_scoped(&self, name: &str, scope: &str) -> Result<Arc<Counter>> {
        self.registry.counter(&self.name(name, Some(scope))?)
    }

    pub fn gauge(&self, name: &str) -> Result<Arc<Gauge>> {
        self.registry.gauge(&self.name(name, None)?)
    }

    pub fn gauge_scoped(&self, name: &str, scope: &str) -> Result<Arc<Gauge>> {
        self.registry.gauge(&self.name(name, Some(scope))?)
    }

    pub fn meter(&self, name: &str) -> Result<Arc<Meter>> {
        self.registry.meter(&self.name(name, None)?)
    }

    pub fn meter_scoped(&self, name: &str, scope: &str) -> Result<Arc<Meter>> {
        self.registry.meter(&self.name(name, Some(scope))?)
    }

    pub fn histogram(&self, name: &str) -> Result<Arc<Histogram>> {
        self.registry.histogram(&self.name(name, None)?)
    }

    pub fn histogram_scoped(&self, name: &str, scope: &str) -> Result<Arc<Histogram>> {
        self.registry.histogram(&self.name(name, Some(scope))?)
    }

    pub fn timer(&self, name: &str) -> Result<Arc<Timer>> {
        self.registry.timer(&self.name(name, None)?)
    }

    pub fn timer_scoped(&self, name: &str, scope: &str) -> Result<Arc<Timer>> {
        self.registry.timer(&self.name(name, Some(scope))?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config;
    use crate::registry::{new_shared_registry, MetricRegistry};

    struct OrderService;

    #[test]
    fn names_hang_off_the_base() {
        let registry = new_shared_registry();
        let metrics = registry.builder(MetricName::new(["orders"]).unwrap());

        let placed = metrics.counter("placed").unwrap();
        placed.inc();
        let submit = metrics.timer_scoped("submit.latency", "v2").unwrap();
        submit.update(std::time::Duration::from_millis(1));

        assert_eq!(
            registry.names(),
            vec!["orders.placed", "orders.submit.latency.v2"]
        );
        assert!(Arc::ptr_eq(&placed, &metrics.counter("placed").unwrap()));
    }

    #[test]
    fn for_type_uses_type_path() {
        let registry = new_shared_registry();
        let metrics = MetricBuilder::for_type::<OrderService>(registry);
        assert_eq!(
            metrics.name("placed", None).unwrap().key(),
            "metreg_registry.builder.tests.OrderService.placed"
        );
    }

    #[test]
    fn namespace_prefixes_base() {
        let cfg = config::load_from_str(
            r#"
version: 1
registry:
  namespace: "app"
"#,
        )
        .unwrap();
        let registry = Arc::new(MetricRegistry::from_config(&cfg).unwrap());
        let metrics = registry.builder(MetricName::new(["orders"]).unwrap().with_scope("eu"));
        assert_eq!(metrics.base_name().key(), "app.orders.eu");
        assert_eq!(metrics.base_name().scope(), None);

        metrics.gauge("depth").unwrap().set(4);
        assert!(registry.contains(&"app.orders.eu.depth".parse().unwrap()));
    }

    #[test]
    fn scoped_bases_stay_apart_under_metric_scope() {
        let registry = new_shared_registry();
        let base = MetricName::new(["orders"]).unwrap();
        let eu = registry.builder(base.with_scope("eu"));
        let us = registry.builder(base.with_scope("us"));

        let eu_placed = eu.counter_scoped("placed", "v2").unwrap();
        let us_placed = us.counter_scoped("placed", "v2").unwrap();

        assert!(!Arc::ptr_eq(&eu_placed, &us_placed));
        assert_eq!(
            registry.names(),
            vec!["orders.eu.placed.v2", "orders.us.placed.v2"]
        );
    }

    #[test]
    fn blank_metric_name_rejected() {
        let registry = new_shared_registry();
        let metrics = registry.builder(MetricName::new(["orders"]).unwrap());

        for bad in ["", " ", ".."] {
            let err = metrics.counter(bad).unwrap_err();
            assert_eq!(err.code().as_str(), "INVALID_NAME");
        }
        let err = metrics.histogram_scoped("..", "v1").unwrap_err();
        assert_eq!(err.code().as_str(), "INVALID_NAME");
        assert!(registry.is_empty());
    }

    #[test]
    fn builder_conflicts_surface() {
        let registry = new_shared_registry();
        let metrics = registry.builder(MetricName::new(["jobs"]).unwrap());
        metrics.meter("done").unwrap();
        let err = metrics.histogram("done").unwrap_err();
        assert_eq!(err.code().as_str(), "TYPE_CONFLICT");
    }
}
