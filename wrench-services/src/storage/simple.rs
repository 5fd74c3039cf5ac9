//! Simple storage service (spec.md §4.6.1): the base case every other
//! storage flavour delegates to or wraps.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use dashmap::DashMap;

use wrench_kernel::host::HostId;
use wrench_kernel::Simulation;

use super::{BufferMode, StorageService};
use crate::data::FileLocation;
use crate::error::StorageServiceError;

/// A (simulated) disk backing one mount point: fixed capacity and
/// read/write bandwidths in bytes/second.
#[derive(Debug, Clone, Copy)]
pub struct DiskSpec {
    /// Total capacity in bytes.
    pub capacity_bytes: u64,
    /// Read bandwidth in bytes/second.
    pub read_bandwidth: f64,
    /// Write bandwidth in bytes/second.
    pub write_bandwidth: f64,
}

struct MountState {
    disk: DiskSpec,
    occupied_bytes: u64,
    stored_files: HashSet<String>,
}

/// A storage service: identity, hostname, and a set of mount points each
/// backed by a [`DiskSpec`]. Buffering is controlled by `BUFFER_SIZE`.
pub struct SimpleStorageService {
    name: String,
    host: HostId,
    sim: Simulation,
    mounts: DashMap<String, MountState>,
    buffer_mode: BufferMode,
}

impl SimpleStorageService {
    /// Build a new simple storage service with no mount points yet.
    pub fn new(name: impl Into<String>, host: HostId, sim: Simulation, buffer_mode: BufferMode) -> Self {
        Self {
            name: name.into(),
            host,
            sim,
            mounts: DashMap::new(),
            buffer_mode,
        }
    }

    /// Mount a disk at `mount_point`.
    pub fn add_mount(&self, mount_point: impl Into<String>, disk: DiskSpec) {
        self.mounts.insert(
            mount_point.into(),
            MountState {
                disk,
                occupied_bytes: 0,
                stored_files: HashSet::new(),
            },
        );
    }

    /// The host this service runs on.
    pub fn host(&self) -> &HostId {
        &self.host
    }

    fn chunk_sizes(&self, total_bytes: u64) -> Vec<u64> {
        match self.buffer_mode {
            BufferMode::Fluid | BufferMode::Full => vec![total_bytes],
            BufferMode::Chunked(chunk) if chunk > 0 => {
                let mut remaining = total_bytes;
                let mut chunks = Vec::new();
                while remaining > 0 {
                    let this_chunk = remaining.min(chunk);
                    chunks.push(this_chunk);
                    remaining -= this_chunk;
                }
                if chunks.is_empty() {
                    chunks.push(0);
                }
                chunks
            }
            BufferMode::Chunked(_) => vec![total_bytes],
        }
    }

    async fn transfer_time(&self, bytes: u64, bandwidth: f64) -> Result<(), StorageServiceError> {
        for chunk in self.chunk_sizes(bytes) {
            let dt = if bandwidth > 0.0 { chunk as f64 / bandwidth } else { 0.0 };
            self.sim.sleep(&self.host, dt).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageService for SimpleStorageService {
    fn name(&self) -> &str {
        &self.name
    }

    async fn free_space(&self) -> HashMap<String, u64> {
        self.mounts
            .iter()
            .map(|entry| (entry.key().clone(), entry.disk.capacity_bytes.saturating_sub(entry.occupied_bytes)))
            .collect()
    }

    async fn lookup(&self, location: &FileLocation) -> bool {
        self.mounts
            .get(&location.mount_point)
            .is_some_and(|mount| mount.stored_files.contains(location.file.id()))
    }

    async fn delete(&self, location: &FileLocation) -> Result<(), StorageServiceError> {
        let mut mount = self
            .mounts
            .get_mut(&location.mount_point)
            .ok_or_else(|| StorageServiceError::FileNotFound { location: location.clone() })?;
        if !mount.stored_files.remove(location.file.id()) {
            return Err(StorageServiceError::FileNotFound { location: location.clone() });
        }
        mount.occupied_bytes -= location.file.size_bytes();
        Ok(())
    }

    async fn write(&self, location: &FileLocation) -> Result<(), StorageServiceError> {
        let size = location.file.size_bytes();
        let write_bandwidth = {
            let mut mount = self.mounts.get_mut(&location.mount_point).ok_or_else(|| {
                StorageServiceError::Service(crate::error::ServiceError::InvalidArgument {
                    reason: format!("no mount point '{}'", location.mount_point),
                })
            })?;
            let free = mount.disk.capacity_bytes.saturating_sub(mount.occupied_bytes);
            if free < size {
                return Err(StorageServiceError::NotEnoughStorageSpace { service: self.name.clone() });
            }
            // Reserve now so a concurrent write cannot also pass the check
            // above; the reservation is rolled back on failure below.
            mount.occupied_bytes += size;
            mount.disk.write_bandwidth
        };

        if let Err(e) = self.transfer_time(size, write_bandwidth).await {
            if let Some(mut mount) = self.mounts.get_mut(&location.mount_point) {
                mount.occupied_bytes -= size;
            }
            return Err(e);
        }

        if let Some(mut mount) = self.mounts.get_mut(&location.mount_point) {
            mount.stored_files.insert(location.file.id().to_string());
        }
        Ok(())
    }

    async fn read(&self, location: &FileLocation) -> Result<(), StorageServiceError> {
        let read_bandwidth = {
            let mount = self
                .mounts
                .get(&location.mount_point)
                .ok_or_else(|| StorageServiceError::FileNotFound { location: location.clone() })?;
            if !mount.stored_files.contains(location.file.id()) {
                return Err(StorageServiceError::FileNotFound { location: location.clone() });
            }
            mount.disk.read_bandwidth
        };
        self.transfer_time(location.file.size_bytes(), read_bandwidth).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::File;
    use wrench_kernel::host::HostSpec;
    use wrench_kernel::KernelConfig;

    fn setup(buffer_mode: BufferMode) -> SimpleStorageService {
        let sim = Simulation::new(KernelConfig::default());
        let host = HostId::new("Storage1");
        sim.hosts().add_host(host.clone(), HostSpec::new(1, 1.0, 1));
        let svc = SimpleStorageService::new("S1", host, sim, buffer_mode);
        svc.add_mount(
            "/disk0",
            DiskSpec {
                capacity_bytes: 1_000_000,
                read_bandwidth: 100_000.0,
                write_bandwidth: 100_000.0,
            },
        );
        svc
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let svc = setup(BufferMode::Fluid);
        let loc = FileLocation::new("S1", "/disk0", File::new("f1", 200_000));
        svc.write(&loc).await.unwrap();
        assert!(svc.lookup(&loc).await);
        svc.read(&loc).await.unwrap();
        assert_eq!(svc.sim.now(), 4.0); // 200_000/100_000 write + 200_000/100_000 read
    }

    #[tokio::test]
    async fn write_then_delete_then_lookup_is_absent() {
        let svc = setup(BufferMode::Fluid);
        let loc = FileLocation::new("S1", "/disk0", File::new("f1", 10));
        svc.write(&loc).await.unwrap();
        svc.delete(&loc).await.unwrap();
        assert!(!svc.lookup(&loc).await);
    }

    #[tokio::test]
    async fn delete_of_absent_file_fails_not_found() {
        let svc = setup(BufferMode::Fluid);
        let loc = FileLocation::new("S1", "/disk0", File::new("ghost", 10));
        assert!(matches!(
            svc.delete(&loc).await,
            Err(StorageServiceError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn write_beyond_capacity_fails() {
        let svc = setup(BufferMode::Fluid);
        let loc = FileLocation::new("S1", "/disk0", File::new("big", 2_000_000));
        assert!(matches!(
            svc.write(&loc).await,
            Err(StorageServiceError::NotEnoughStorageSpace { .. })
        ));
    }

    #[tokio::test]
    async fn chunked_buffer_mode_sums_to_the_same_total_delay() {
        let svc = setup(BufferMode::Chunked(50_000));
        let loc = FileLocation::new("S1", "/disk0", File::new("f1", 120_000));
        svc.write(&loc).await.unwrap();
        assert_eq!(svc.sim.now(), 1.2);
    }
}
