//! Trait seam between the enricher and whatever holds the region documents.

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::RegionLookup;

/// A read-only source of region values keyed by provider id.
///
/// Implementations must not mutate the underlying store; the enricher relies
/// on lookups being repeatable.
#[async_trait]
pub trait RegionSource: Send + Sync {
    /// Look up the region for a single provider.
    ///
    /// `Ok(RegionLookup::NotFound)` is the ordinary miss case. Errors are
    /// reserved for conditions worth counting separately: connectivity,
    /// timeouts, malformed documents.
    async fn region_for(&self, provider_id: &str) -> SourceResult<RegionLookup>;
}
