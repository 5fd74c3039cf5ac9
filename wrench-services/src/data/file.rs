//! File identity, location and proxy-location triples (spec.md §3).

use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable file: an identifier and a size. Many [`FileLocation`]s may
/// reference the same `File`; the file itself carries no location data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct File {
    id: String,
    size_bytes: u64,
}

impl File {
    /// A new file with the given id and size.
    pub fn new(id: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: id.into(),
            size_bytes,
        }
    }

    /// The file's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The file's size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}B)", self.id, self.size_bytes)
    }
}

/// A triple (storage service, mount point, file). Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileLocation {
    /// Name of the storage service hosting this location.
    pub storage_service: String,
    /// Mount point within that service.
    pub mount_point: String,
    /// The file itself.
    pub file: File,
}

impl FileLocation {
    /// Build a new location.
    pub fn new(storage_service: impl Into<String>, mount_point: impl Into<String>, file: File) -> Self {
        Self {
            storage_service: storage_service.into(),
            mount_point: mount_point.into(),
            file,
        }
    }

    /// Wrap this location behind `proxy`, indicating "fetch via this proxy
    /// from that ultimate destination".
    pub fn via_proxy(self, proxy_service: impl Into<String>) -> ProxyLocation {
        ProxyLocation {
            proxy_service: proxy_service.into(),
            target: self,
        }
    }
}

/// A location wrapping another location with an additional target service:
/// "fetch via this proxy from that ultimate destination".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyLocation {
    /// The proxy storage service the request should actually be sent to.
    pub proxy_service: String,
    /// The wrapped, ultimate location.
    pub target: FileLocation,
}
