//! Configuration for the enrichment step, loaded once at startup.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Feature toggle: `"1"` enables enrichment, anything else disables it.
pub const USE_MONGO_FOR_REGION: &str = "USE_MONGO_FOR_REGION";
/// Connection string to the document store. Required when enabled.
pub const MONGO_URI: &str = "MONGO_URI";
/// Database name. Required when enabled.
pub const MONGO_DB: &str = "MONGO_DB";
/// Collection name. Required when enabled.
pub const MONGO_COL: &str = "MONGO_COL";

const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5_000;

/// Where the provider documents live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoTarget {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Process-wide configuration for region enrichment.
///
/// Constructed once at startup and treated as immutable for the run.
/// `target` is always `Some` when `enabled` is true; [`EnrichmentConfig::from_env`]
/// fails fast rather than producing an enabled config with no target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// When false, the enricher never attempts an external lookup.
    pub enabled: bool,

    /// Connection parameters, present when enrichment is enabled.
    pub target: Option<MongoTarget>,

    /// Upper bound for a single lookup, in milliseconds.
    ///
    /// A lookup that exceeds this is treated as a soft failure, not an abort.
    pub lookup_timeout_ms: u64,
}

impl EnrichmentConfig {
    /// Config with enrichment switched off. Records pass through unchanged.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            target: None,
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }

    /// Config with enrichment switched on against the given target.
    pub fn enabled(target: MongoTarget) -> Self {
        Self {
            enabled: true,
            target: Some(target),
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }

    /// Set the per-lookup timeout.
    pub fn with_lookup_timeout_ms(mut self, ms: u64) -> Self {
        self.lookup_timeout_ms = ms;
        self
    }

    /// Per-lookup timeout as a [`Duration`].
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// Load configuration from environment variables.
    ///
    /// When `USE_MONGO_FOR_REGION` is not exactly `"1"`, enrichment is
    /// disabled and the `MONGO_*` variables are ignored. When enabled, all
    /// three `MONGO_*` variables must be set and non-empty.
    pub fn from_env() -> ConfigResult<Self> {
        let enabled = env::var(USE_MONGO_FOR_REGION)
            .map(|v| v == "1")
            .unwrap_or(false);

        if !enabled {
            return Ok(Self::disabled());
        }

        Ok(Self::enabled(MongoTarget {
            uri: require(MONGO_URI)?,
            database: require(MONGO_DB)?,
            collection: require(MONGO_COL)?,
        }))
    }
}

fn require(var: &'static str) -> ConfigResult<String> {
    env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar { var })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_config_has_no_target() {
        let config = EnrichmentConfig::disabled();
        assert!(!config.enabled);
        assert!(config.target.is_none());
    }

    #[test]
    fn enabled_config_keeps_target() {
        let target = MongoTarget {
            uri: "mongodb://localhost:27017".into(),
            database: "ds2002".into(),
            collection: "providers".into(),
        };
        let config = EnrichmentConfig::enabled(target.clone()).with_lookup_timeout_ms(250);

        assert!(config.enabled);
        assert_eq!(config.target, Some(target));
        assert_eq!(config.lookup_timeout(), Duration::from_millis(250));
    }

    // Environment scenarios share one test so they cannot race each other
    // through the process-wide environment.
    #[test]
    fn from_env_scenarios() {
        // Toggle absent: disabled.
        env::remove_var(USE_MONGO_FOR_REGION);
        env::remove_var(MONGO_URI);
        env::remove_var(MONGO_DB);
        env::remove_var(MONGO_COL);
        let config = EnrichmentConfig::from_env().unwrap();
        assert!(!config.enabled);

        // Toggle set to anything other than "1": disabled, MONGO_* ignored.
        env::set_var(USE_MONGO_FOR_REGION, "true");
        let config = EnrichmentConfig::from_env().unwrap();
        assert!(!config.enabled);

        // Enabled but MONGO_URI missing: fail fast.
        env::set_var(USE_MONGO_FOR_REGION, "1");
        let err = EnrichmentConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar { var: MONGO_URI }));

        // Empty values count as missing.
        env::set_var(MONGO_URI, "mongodb://localhost:27017");
        env::set_var(MONGO_DB, "");
        let err = EnrichmentConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar { var: MONGO_DB }));

        // Fully configured: enabled with target.
        env::set_var(MONGO_DB, "ds2002");
        env::set_var(MONGO_COL, "providers");
        let config = EnrichmentConfig::from_env().unwrap();
        assert!(config.enabled);
        let target = config.target.unwrap();
        assert_eq!(target.database, "ds2002");
        assert_eq!(target.collection, "providers");

        env::remove_var(USE_MONGO_FOR_REGION);
        env::remove_var(MONGO_URI);
        env::remove_var(MONGO_DB);
        env::remove_var(MONGO_COL);
    }
}
