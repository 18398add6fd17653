//! The region enrichment step itself.

use tracing::{debug, warn};

use crate::config::EnrichmentConfig;
use crate::traits::RegionSource;
use crate::types::{BatchReport, EnrichOutcome, EnrichmentStats, ProviderRecord, RegionLookup};

/// Decides, per provider record, whether to consult the external store for a
/// region and applies the result.
///
/// Single-shot and idempotent: it performs at most one read per invocation
/// and never writes to the store. Every per-record failure degrades to
/// "leave the region unchanged"; only configuration loading can abort a run,
/// and that happens before an enricher exists.
pub struct RegionEnricher<S> {
    config: EnrichmentConfig,
    source: Option<S>,
}

impl<S> RegionEnricher<S> {
    /// Enricher that passes every record through untouched.
    pub fn disabled(config: EnrichmentConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// The config this enricher was built with.
    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }
}

impl<S: RegionSource> RegionEnricher<S> {
    /// Enricher that consults `source` when the config enables enrichment.
    pub fn new(config: EnrichmentConfig, source: S) -> Self {
        Self {
            config,
            source: Some(source),
        }
    }

    /// Enrich a single record in place.
    ///
    /// When disabled, the record is returned unchanged and the source is
    /// never queried.
    pub async fn enrich(&self, record: &mut ProviderRecord) -> EnrichOutcome {
        let source = match (self.config.enabled, &self.source) {
            (true, Some(source)) => source,
            _ => return EnrichOutcome::Skipped,
        };

        match source.region_for(&record.provider_id).await {
            Ok(RegionLookup::Found(region)) => {
                debug!(provider_id = %record.provider_id, %region, "region enriched");
                record.region = region.clone();
                EnrichOutcome::Enriched { region }
            }
            Ok(RegionLookup::NotFound) => {
                debug!(
                    provider_id = %record.provider_id,
                    "no region document, keeping existing value"
                );
                EnrichOutcome::Miss
            }
            Err(err) => {
                warn!(
                    provider_id = %record.provider_id,
                    error = %err,
                    "region lookup failed, keeping existing value"
                );
                EnrichOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Enrich a batch of records in input order.
    ///
    /// Lookup failures on one record never stop processing of the rest.
    pub async fn enrich_batch(&self, records: &mut [ProviderRecord]) -> BatchReport {
        let mut stats = EnrichmentStats::default();
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records.iter_mut() {
            let outcome = self.enrich(record).await;
            stats.record(&outcome);
            outcomes.push(outcome);
        }

        BatchReport { stats, outcomes }
    }
}
