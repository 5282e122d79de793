use serde::Deserialize;

use metreg_core::error::{MetricsError, Result};
use metreg_core::metric::ReservoirFactory;
use metreg_core::name::MetricName;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub version: u32,

    #[serde(default)]
    pub registry: RegistrySection,
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }
        self.registry.validate()
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            version: 1,
            registry: RegistrySection::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// Dotted prefix for builder base names.
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub reservoir: ReservoirSection,
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        if let Some(ns) = &self.namespace {
            ns.parse::<MetricName>().map_err(|_| {
                MetricsError::BadConfig("registry.namespace must contain a non-empty segment".into())
            })?;
        }
        self.reservoir.validate()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservoirKind {
    #[default]
    SlidingWindow,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReservoirSection {
    #[serde(default)]
    pub kind: ReservoirKind,

    #[serde(default = "default_reservoir_size")]
    pub size: usize,
}

impl Default for ReservoirSection {
    fn default() -> Self {
        Self {
            kind: ReservoirKind::default(),
            size: default_reservoir_size(),
        }
    }
}

impl ReservoirSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1_000_000).contains(&self.size) {
            return Err(MetricsError::BadConfig(
                "registry.reservoir.size must be between 1 and 1000000".into(),
            ));
        }
        Ok(())
    }

    pub fn factory(&self) -> ReservoirFactory {
        match self.kind {
            ReservoirKind::SlidingWindow => ReservoirFactory::sliding_window(self.size),
        }
    }
}

fn default_reservoir_size() -> usize {
    1028
}
