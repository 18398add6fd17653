//! Typed errors for the enrichment library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! The split matters operationally: [`ConfigError`] is fatal and stops a run
//! before any record is touched, while [`SourceError`] is always soft at the
//! batch level. The enricher converts source errors into counted failures and
//! leaves the record unchanged.

use std::time::Duration;

use thiserror::Error;

/// Fatal configuration problems, detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is missing while enrichment is enabled
    #[error("{var} must be set when USE_MONGO_FOR_REGION=1")]
    MissingVar { var: &'static str },

    /// Connection string could not be parsed
    #[error("invalid MONGO_URI: {0}")]
    InvalidUri(String),
}

/// Errors a region source can produce for a single lookup.
///
/// Every variant degrades to "leave the record's region unchanged".
#[derive(Debug, Error)]
pub enum SourceError {
    /// Could not reach the document store
    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Lookup exceeded the configured bound
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    /// A document was found but its region field is absent or empty
    #[error("document for provider {provider_id} has no usable region field")]
    MalformedDocument { provider_id: String },
}

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for source lookups.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
