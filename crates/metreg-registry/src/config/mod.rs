//! Registry config loader (strict parsing).

pub mod schema;

use std::fs;

use metreg_core::error::{MetricsError, Result};

pub use schema::{RegistryConfig, RegistrySection, ReservoirKind, ReservoirSection};

pub fn load_from_file(path: &str) -> Result<RegistryConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RegistryConfig> {
    let cfg: RegistryConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
