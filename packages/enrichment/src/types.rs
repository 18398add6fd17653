//! Data types flowing through the enrichment step.

use serde::{Deserialize, Serialize};

/// One provider row from the primary data source.
///
/// Read by the surrounding ETL process, mutated in place by the enricher to
/// populate `region`, then forwarded downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub provider_id: String,
    pub network_tier: String,

    /// Possibly empty before enrichment.
    #[serde(default)]
    pub region: String,
}

impl ProviderRecord {
    pub fn new(
        provider_id: impl Into<String>,
        network_tier: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            network_tier: network_tier.into(),
            region: region.into(),
        }
    }
}

/// Shape of a provider document in the external store.
///
/// The store is schemaless, so everything beyond the id is optional and
/// validated on read. A document with no usable region degrades to a miss
/// instead of propagating invalid data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderDocument {
    pub provider_id: String,
    #[serde(default)]
    pub network_tier: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub preferred_provider: Option<String>,
}

/// Result of one source lookup. Transient, lives for a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionLookup {
    /// A document matched and carried a usable region.
    Found(String),
    /// No document for the provider id.
    NotFound,
}

/// Per-record outcome of an enrichment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EnrichOutcome {
    /// Enrichment disabled; record passed through untouched.
    Skipped,
    /// Region overwritten from the store.
    Enriched { region: String },
    /// No document for the provider id; record unchanged.
    Miss,
    /// Lookup failed softly (connectivity, timeout, malformed document);
    /// record unchanged.
    Failed { reason: String },
}

/// Aggregate counters for a run, surfaced so operators can tell a healthy
/// run from a systemic outage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentStats {
    pub processed: usize,
    pub hits: usize,
    pub misses: usize,
    pub failures: usize,
    pub skipped: usize,
}

impl EnrichmentStats {
    /// Fold one outcome into the counters.
    pub fn record(&mut self, outcome: &EnrichOutcome) {
        self.processed += 1;
        match outcome {
            EnrichOutcome::Skipped => self.skipped += 1,
            EnrichOutcome::Enriched { .. } => self.hits += 1,
            EnrichOutcome::Miss => self.misses += 1,
            EnrichOutcome::Failed { .. } => self.failures += 1,
        }
    }
}

/// Result of enriching a batch. Outcomes are in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub stats: EnrichmentStats,
    pub outcomes: Vec<EnrichOutcome>,
}

/// Normalize a region name the way the rest of the pipeline expects it:
/// trimmed and lowercased.
pub fn normalize_region(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_region_trims_and_lowercases() {
        assert_eq!(normalize_region("  US-East "), "us-east");
        assert_eq!(normalize_region("southwest"), "southwest");
        assert_eq!(normalize_region(""), "");
    }

    #[test]
    fn stats_fold_outcomes() {
        let mut stats = EnrichmentStats::default();
        stats.record(&EnrichOutcome::Enriched {
            region: "us-east".into(),
        });
        stats.record(&EnrichOutcome::Miss);
        stats.record(&EnrichOutcome::Failed {
            reason: "connection error".into(),
        });
        stats.record(&EnrichOutcome::Skipped);

        assert_eq!(stats.processed, 4);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn provider_record_defaults_region_when_absent() {
        let record: ProviderRecord =
            serde_json::from_str(r#"{"provider_id":"P1","network_tier":"gold"}"#).unwrap();
        assert_eq!(record.region, "");
    }
}
