//! Shared error type across metreg crates.

use thiserror::Error;

use crate::metric::MetricKind;

/// Stable error codes (safe to match on from callers and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Name reused for a different metric kind.
    TypeConflict,
    /// Name has no usable segments.
    InvalidName,
    /// Configuration could not be parsed or is out of range.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal failure.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and assertions.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::TypeConflict => "TYPE_CONFLICT",
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// A metric already exists under `name` with a different kind.
    #[error("metric {name} is already registered as a {existing}, requested {requested}")]
    TypeConflict {
        name: String,
        existing: MetricKind,
        requested: MetricKind,
    },
    #[error("invalid metric name: {0}")]
    InvalidName(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::TypeConflict { .. } => ErrorCode::TypeConflict,
            MetricsError::InvalidName(_) => ErrorCode::InvalidName,
            MetricsError::BadConfig(_) => ErrorCode::BadConfig,
            MetricsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
