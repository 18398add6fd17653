//! In-memory region source for testing and development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::traits::RegionSource;
use crate::types::{normalize_region, RegionLookup};

/// In-memory map from provider id to region.
///
/// Useful for tests and offline runs. Not suitable for production as data is
/// lost on restart.
#[derive(Default)]
pub struct MemoryRegionSource {
    regions: RwLock<HashMap<String, String>>,
}

impl MemoryRegionSource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region for a provider id.
    pub fn with_region(self, provider_id: impl Into<String>, region: impl Into<String>) -> Self {
        self.regions
            .write()
            .unwrap()
            .insert(provider_id.into(), region.into());
        self
    }

    /// Insert or replace a region for a provider id.
    pub fn insert(&self, provider_id: impl Into<String>, region: impl Into<String>) {
        self.regions
            .write()
            .unwrap()
            .insert(provider_id.into(), region.into());
    }

    /// Number of stored provider ids.
    pub fn len(&self) -> usize {
        self.regions.read().unwrap().len()
    }

    /// Whether the source holds no documents.
    pub fn is_empty(&self) -> bool {
        self.regions.read().unwrap().is_empty()
    }
}

#[async_trait]
impl RegionSource for MemoryRegionSource {
    async fn region_for(&self, provider_id: &str) -> SourceResult<RegionLookup> {
        Ok(self
            .regions
            .read()
            .unwrap()
            .get(provider_id)
            .map(|region| RegionLookup::Found(normalize_region(region)))
            .unwrap_or(RegionLookup::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_hits_and_misses() {
        let source = MemoryRegionSource::new().with_region("P1", " US-East ");

        assert_eq!(
            source.region_for("P1").await.unwrap(),
            RegionLookup::Found("us-east".into())
        );
        assert_eq!(source.region_for("P2").await.unwrap(), RegionLookup::NotFound);
    }
}
