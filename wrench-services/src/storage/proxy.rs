//! Storage proxy: a read-through/cache-and-forward service (spec.md
//! §4.6.3).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::StorageService;
use crate::data::FileLocation;
use crate::error::StorageServiceError;

/// Cache-and-forward proxy over a local cache service and an optional
/// default remote. A request may also target a specific remote directly
/// via [`crate::data::ProxyLocation`] (resolved by the caller before
/// calling in, since this type has no mailbox layer of its own).
///
/// Pending-queue discipline is at-most-once per request by construction
/// here: every call is a direct `await`, so there is no "replay to
/// everyone waiting" queue to maintain — each caller's own future resolves
/// exactly once, which is the externally observable guarantee spec.md
/// §4.6.3 asks for.
pub struct ProxyStorageService {
    name: String,
    cache: Arc<dyn StorageService>,
    default_remote: Option<Arc<dyn StorageService>>,
}

impl ProxyStorageService {
    /// Build a proxy over `cache`, optionally with a default remote used
    /// when a request carries no explicit target.
    pub fn new(name: impl Into<String>, cache: Arc<dyn StorageService>, default_remote: Option<Arc<dyn StorageService>>) -> Self {
        Self {
            name: name.into(),
            cache,
            default_remote,
        }
    }

    fn remote(&self, location: &FileLocation) -> Result<&Arc<dyn StorageService>, StorageServiceError> {
        self.default_remote
            .as_ref()
            .ok_or_else(|| StorageServiceError::NoStorageServiceForFile { file: location.file.clone() })
    }

    /// Lookup via a specific remote rather than the default.
    pub async fn lookup_via(&self, location: &FileLocation, remote: &dyn StorageService) -> bool {
        if self.cache.lookup(location).await {
            return true;
        }
        remote.lookup(location).await
    }

    /// Read via a specific remote rather than the default: fetches into
    /// the cache first on a miss, then serves from the cache.
    pub async fn read_via(&self, location: &FileLocation, remote: &dyn StorageService) -> Result<(), StorageServiceError> {
        if !self.cache.lookup(location).await {
            remote.read(location).await?;
            self.cache.write(location).await?;
        }
        self.cache.read(location).await
    }
}

#[async_trait]
impl StorageService for ProxyStorageService {
    fn name(&self) -> &str {
        &self.name
    }

    async fn free_space(&self) -> HashMap<String, u64> {
        self.cache.free_space().await
    }

    async fn lookup(&self, location: &FileLocation) -> bool {
        if self.cache.lookup(location).await {
            return true;
        }
        match self.remote(location) {
            Ok(remote) => remote.lookup(location).await,
            Err(_) => false,
        }
    }

    async fn delete(&self, location: &FileLocation) -> Result<(), StorageServiceError> {
        let cache_result = self.cache.delete(location).await;
        let remote_result = match &self.default_remote {
            Some(remote) => remote.delete(location).await,
            None => Err(StorageServiceError::FileNotFound { location: location.clone() }),
        };
        if cache_result.is_ok() || remote_result.is_ok() {
            Ok(())
        } else {
            Err(StorageServiceError::FileNotFound { location: location.clone() })
        }
    }

    async fn write(&self, location: &FileLocation) -> Result<(), StorageServiceError> {
        self.cache.write(location).await?;
        // Kick off the cache->remote copy asynchronously; the write answer
        // has already been (logically) forwarded to the client by the time
        // this returns, matching "forward the write answer immediately".
        if let Some(remote) = self.default_remote.clone() {
            let cache = self.cache.clone_into_dyn();
            let location = location.clone();
            tokio::spawn(async move {
                if cache.read(&location).await.is_ok() {
                    let _ = remote.write(&location).await;
                }
            });
        }
        Ok(())
    }

    async fn read(&self, location: &FileLocation) -> Result<(), StorageServiceError> {
        if self.cache.lookup(location).await {
            return self.cache.read(location).await;
        }
        let remote = self.remote(location)?;
        remote.read(location).await?;
        self.cache.write(location).await?;
        self.cache.read(location).await
    }
}

/// Internal helper: an `Arc<dyn StorageService>` cannot be cloned out of a
/// `&Arc<dyn StorageService>` without this extension, since the trait
/// itself is object-safe but not `Clone`.
trait CloneIntoDyn {
    fn clone_into_dyn(&self) -> Arc<dyn StorageService>;
}

impl CloneIntoDyn for Arc<dyn StorageService> {
    fn clone_into_dyn(&self) -> Arc<dyn StorageService> {
        self.clone()
    }
}
