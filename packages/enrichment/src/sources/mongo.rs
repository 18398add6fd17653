//! MongoDB-backed region source.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::debug;

use crate::config::MongoTarget;
use crate::error::{ConfigError, ConfigResult, SourceError, SourceResult};
use crate::traits::RegionSource;
use crate::types::{normalize_region, ProviderDocument, RegionLookup};

/// Region source that performs a single-document lookup per provider id
/// against a MongoDB collection.
///
/// Read-only: never writes to the store.
pub struct MongoRegionSource {
    collection: Collection<ProviderDocument>,
    lookup_timeout: Duration,
}

impl MongoRegionSource {
    /// Build a source against the configured target.
    ///
    /// Only the connection string is validated here; the client connects
    /// lazily, so an unreachable server surfaces later as a per-lookup
    /// [`SourceError::Connection`], not a startup failure.
    pub async fn connect(target: &MongoTarget, lookup_timeout: Duration) -> ConfigResult<Self> {
        let options = ClientOptions::parse(&target.uri)
            .await
            .map_err(|e| ConfigError::InvalidUri(e.to_string()))?;
        let client =
            Client::with_options(options).map_err(|e| ConfigError::InvalidUri(e.to_string()))?;
        let collection = client
            .database(&target.database)
            .collection::<ProviderDocument>(&target.collection);

        debug!(
            database = %target.database,
            collection = %target.collection,
            "mongo region source ready"
        );

        Ok(Self {
            collection,
            lookup_timeout,
        })
    }
}

#[async_trait]
impl RegionSource for MongoRegionSource {
    async fn region_for(&self, provider_id: &str) -> SourceResult<RegionLookup> {
        let filter = doc! { "provider_id": provider_id };
        let found = tokio::time::timeout(self.lookup_timeout, self.collection.find_one(filter, None))
            .await
            .map_err(|_| SourceError::Timeout(self.lookup_timeout))?
            .map_err(|e| SourceError::Connection(Box::new(e)))?;

        let document = match found {
            Some(document) => document,
            None => return Ok(RegionLookup::NotFound),
        };

        // Validate at the boundary: a matched document without a usable
        // region must not overwrite the record.
        match document.region.as_deref().filter(|r| !r.trim().is_empty()) {
            Some(region) => Ok(RegionLookup::Found(normalize_region(region))),
            None => Err(SourceError::MalformedDocument {
                provider_id: provider_id.to_string(),
            }),
        }
    }
}
