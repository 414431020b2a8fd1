//! Shared station catalog.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Station;

use super::client::CatalogClient;
use super::error::CatalogError;

/// Thread-safe station catalog with support for background refresh.
///
/// Loaded once at startup from the price feed and refreshed daily; the
/// planner works on immutable snapshots, so an in-flight request never
/// sees a half-replaced catalog.
#[derive(Clone)]
pub struct StationCatalog {
    inner: Arc<RwLock<Vec<Arc<Station>>>>,
    client: CatalogClient,
}

impl StationCatalog {
    /// Create a catalog by fetching from the feed.
    ///
    /// Fails if the feed is unreachable.
    pub async fn fetch(client: CatalogClient) -> Result<Self, CatalogError> {
        let stations = client.fetch_all().await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(stations)),
            client,
        })
    }

    /// Create an empty catalog (for tests).
    pub fn empty(client: CatalogClient) -> Self {
        Self::with_stations(client, Vec::new())
    }

    /// Create a catalog preloaded with the given stations (for tests).
    pub fn with_stations(client: CatalogClient, stations: Vec<Arc<Station>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(stations)),
            client,
        }
    }

    /// An immutable snapshot of the current station list.
    pub async fn snapshot(&self) -> Vec<Arc<Station>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Number of stations currently loaded.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// True when no stations are loaded.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Refresh the catalog from the feed.
    ///
    /// On success, replaces the current list and returns its size. On
    /// failure the existing list is preserved and the error returned.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let stations = self.client.fetch_all().await?;
        let count = stations.len();

        let mut guard = self.inner.write().await;
        *guard = stations;

        Ok(count)
    }
}
