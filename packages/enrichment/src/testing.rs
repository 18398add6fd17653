//! Testing utilities including mock implementations.
//!
//! Useful for testing code that drives the enricher without a running
//! MongoDB instance.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{SourceError, SourceResult};
use crate::traits::RegionSource;
use crate::types::RegionLookup;

/// Failure modes the mock can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    Timeout,
    MalformedDocument,
}

/// A mock region source with configurable responses and call tracking.
///
/// Cloning shares the underlying state, so a test can keep a handle for
/// assertions after handing a clone to the enricher.
#[derive(Default, Clone)]
pub struct MockRegionSource {
    regions: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashMap<String, FailureKind>>>,
    fail_all: Arc<RwLock<Option<FailureKind>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockRegionSource {
    /// Create a new mock with no documents.
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

    /// Fail lookups for one provider id.
    pub fn failing_for(self, provider_id: impl Into<String>, kind: FailureKind) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(provider_id.into(), kind);
        self
    }

    /// Fail every lookup, simulating a systemic outage.
    pub fn failing_always(self, kind: FailureKind) -> Self {
        *self.fail_all.write().unwrap() = Some(kind);
        self
    }

    /// Provider ids looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn error_for(kind: FailureKind, provider_id: &str) -> SourceError {
        match kind {
            FailureKind::Connection => {
                SourceError::Connection("simulated connection refused".into())
            }
            FailureKind::Timeout => SourceError::Timeout(Duration::from_millis(1)),
            FailureKind::MalformedDocument => SourceError::MalformedDocument {
                provider_id: provider_id.to_string(),
            },
        }
    }
}

#[async_trait]
impl RegionSource for MockRegionSource {
    async fn region_for(&self, provider_id: &str) -> SourceResult<RegionLookup> {
        self.calls.write().unwrap().push(provider_id.to_string());

        if let Some(kind) = *self.fail_all.read().unwrap() {
            return Err(Self::error_for(kind, provider_id));
        }
        if let Some(kind) = self.failures.read().unwrap().get(provider_id) {
            return Err(Self::error_for(*kind, provider_id));
        }

        Ok(self
            .regions
            .read()
            .unwrap()
            .get(provider_id)
            .map(|region| RegionLookup::Found(region.clone()))
            .unwrap_or(RegionLookup::NotFound))
    }
}
