//! Region Enrichment Library
//!
//! Optional enrichment step for the insurance data mart ETL: given a
//! provider record, resolve its region either from the record itself or from
//! an external document store, keyed by provider id.
//!
//! # Design
//!
//! - The `USE_MONGO_FOR_REGION` toggle maps to an explicit
//!   [`EnrichmentConfig`] built once at startup; no global state checks in
//!   the enrichment logic.
//! - Lookups go through the [`RegionSource`] trait so the store can be
//!   MongoDB in production and an in-memory map in tests.
//! - Per-record failures (miss, connectivity, timeout, malformed document)
//!   are soft: the record keeps its existing region and the failure is
//!   counted. Only configuration errors stop a run, and they do so before
//!   any record is processed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use enrichment::{EnrichmentConfig, MemoryRegionSource, ProviderRecord, RegionEnricher};
//!
//! let config = EnrichmentConfig::from_env()?;
//! let source = MemoryRegionSource::new().with_region("P1", "us-east");
//! let enricher = RegionEnricher::new(config, source);
//!
//! let mut records = vec![ProviderRecord::new("P1", "gold", "")];
//! let report = enricher.enrich_batch(&mut records).await;
//! println!("hits={} misses={}", report.stats.hits, report.stats.misses);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The [`RegionSource`] seam
//! - [`types`] - Records, documents, outcomes, stats
//! - [`sources`] - Source implementations (Mongo, in-memory)
//! - [`config`] - Environment-driven configuration
//! - [`testing`] - Mock implementations for testing

pub mod config;
pub mod enricher;
pub mod error;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use config::{EnrichmentConfig, MongoTarget};
pub use enricher::RegionEnricher;
pub use error::{ConfigError, SourceError};
pub use sources::{MemoryRegionSource, MongoRegionSource};
pub use traits::RegionSource;
pub use types::{
    normalize_region, BatchReport, EnrichOutcome, EnrichmentStats, ProviderDocument,
    ProviderRecord, RegionLookup,
};
