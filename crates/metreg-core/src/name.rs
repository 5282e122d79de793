//! Structured metric names.
//!
//! A `MetricName` is an ordered list of segments plus an optional scope,
//! rendered into a single dotted key. The key is what the registry indexes on,
//! so rendering must stay stable:
//! - segments are joined with `.`
//! - a scope, when present, is appended as the final `.`-separated part
//! - blank segments are skipped; a blank scope counts as no scope

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MetricsError, Result};

const SEPARATOR: &str = ".";

/// Immutable registry key: segments + optional scope.
#[derive(Debug, Clone)]
pub struct MetricName {
    segments: Vec<String>,
    scope: Option<String>,
    key: String,
}

impl MetricName {
    /// Build a name from segments. Fails if no non-blank segment remains.
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = clean(segments);
        if segments.is_empty() {
            return Err(MetricsError::InvalidName(
                "at least one non-empty segment is required".into(),
            ));
        }
        Ok(Self::from_parts(segments, None))
    }

    /// Name derived from a Rust type path, e.g. `app::api::Handler` -> `app.api.Handler`.
    /// Generic parameters are dropped.
    pub fn of_type<T: ?Sized>() -> Self {
        let path = std::any::type_name::<T>();
        let path = path.split('<').next().unwrap_or(path);
        let segments = clean(path.split("::"));
        if segments.is_empty() {
            // type_name never yields an empty path in practice
            return Self::from_parts(vec![path.to_string()], None);
        }
        Self::from_parts(segments, None)
    }

    /// Same segments with `scope` attached (replacing any existing scope).
    pub fn with_scope(&self, scope: impl AsRef<str>) -> Self {
        let scope = scope.as_ref().trim();
        let scope = (!scope.is_empty()).then(|| scope.to_string());
        Self::from_parts(self.segments.clone(), scope)
    }

    /// Same segments, scope dropped.
    pub fn without_scope(&self) -> Self {
        Self::from_parts(self.segments.clone(), None)
    }

    /// New name with extra segments appended; the scope is preserved.
    pub fn append<I, S>(&self, more: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments = self.segments.clone();
        segments.extend(clean(more));
        Self::from_parts(segments, self.scope.clone())
    }

    /// Rendered registry key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn from_parts(segments: Vec<String>, scope: Option<String>) -> Self {
        let mut key = segments.join(SEPARATOR);
        if let Some(s) = &scope {
            key.push_str(SEPARATOR);
            key.push_str(s);
        }
        Self { segments, scope, key }
    }
}

fn clean<I, S>(segments: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Parses a dotted key. The result carries no scope.
impl FromStr for MetricName {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.split(SEPARATOR))
    }
}

// Identity is the rendered key.
impl PartialEq for MetricName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for MetricName {}

impl Hash for MetricName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for MetricName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetricName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Serialize for MetricName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

impl<'de> Deserialize<'de> for MetricName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
