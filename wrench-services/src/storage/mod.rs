//! Storage service family (spec.md §4.6): a shared trait implemented by the
//! simple, proxy and compound flavours, plus the buffering policy they all
//! honour.

mod compound;
mod proxy;
mod simple;

pub use compound::{CompoundStorageService, IoAction, StorageSelectionStrategy, TraceEntry};
pub use proxy::ProxyStorageService;
pub use simple::{DiskSpec, SimpleStorageService};

use async_trait::async_trait;

use crate::data::FileLocation;
use crate::error::StorageServiceError;

/// `BUFFER_SIZE` property (spec.md §4.6.1): how a storage service chunks a
/// transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferMode {
    /// No chunk messages; the whole transfer is modelled as one bulk sleep.
    Fluid,
    /// Actual chunk size in bytes.
    Chunked(u64),
    /// Receive/read the file fully before forwarding it onward.
    Full,
}

/// Shared behaviour across simple, proxy, and compound storage services.
///
/// Each method corresponds to one request/answer pair from the protocol
/// table in spec.md §4.6.1 — expressed directly as an async method rather
/// than a literal mailbox round-trip, since the interesting behaviour is
/// the bookkeeping and failure propagation, not the envelope plumbing
/// (which `wrench-kernel::mailbox` already provides generically).
#[async_trait]
pub trait StorageService: Send + Sync {
    /// This service's name, as it would appear in a [`FileLocation`].
    fn name(&self) -> &str;

    /// Free bytes per mount point.
    async fn free_space(&self) -> std::collections::HashMap<String, u64>;

    /// Whether `location`'s file is currently present.
    async fn lookup(&self, location: &FileLocation) -> bool;

    /// Remove a file if present; [`StorageServiceError::FileNotFound`]
    /// otherwise.
    async fn delete(&self, location: &FileLocation) -> Result<(), StorageServiceError>;

    /// Reserve space and simulate writing `location`'s file; commits the
    /// file to `stored_files` atomically only once the write completes.
    async fn write(&self, location: &FileLocation) -> Result<(), StorageServiceError>;

    /// Simulate reading `location`'s file in full.
    async fn read(&self, location: &FileLocation) -> Result<(), StorageServiceError>;
}
