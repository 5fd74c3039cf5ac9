//! Compound (striping) storage service (spec.md §4.6.4): never stores data
//! itself, only routes each file across a set of children.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::StorageService;
use crate::data::{File, FileLocation};
use crate::error::StorageServiceError;

/// A structured compound-storage trace entry (spec.md §6.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Simulated timestamp the action occurred at.
    pub ts: f64,
    /// What happened.
    pub action: IoAction,
    /// A per-child free-space/load snapshot taken at trace time.
    pub disk_usage: Vec<DiskUsageSnapshot>,
    /// The file locations the action touched.
    pub locations: Vec<FileLocation>,
}

/// One child's usage snapshot inside a [`TraceEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskUsageSnapshot {
    /// The child storage service's name.
    pub service_id: String,
    /// Its free bytes at trace time (summed across its mount points).
    pub free_bytes: u64,
    /// The file this entry concerns, if any.
    pub file_id: Option<String>,
    /// A coarse load figure (reserved for future use; always `0.0` here).
    pub load: f64,
}

/// Kind of I/O action a [`TraceEntry`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IoAction {
    ReadStart,
    ReadEnd,
    WriteStart,
    WriteEnd,
    DeleteStart,
    DeleteEnd,
    None,
}

/// A user-supplied pure function choosing how to stripe one file across the
/// compound service's children: given the file and the child list, returns
/// `(child_index, chunk_size_bytes)` pairs whose sizes sum to the file size.
pub type StorageSelectionStrategy = Arc<dyn Fn(&File, &[Arc<dyn StorageService>]) -> Vec<(usize, u64)> + Send + Sync>;

fn internal_striping(max_chunk: u64, file: &File, children: &[Arc<dyn StorageService>]) -> Vec<(usize, u64)> {
    let max_chunk = if max_chunk == 0 { u64::MAX } else { max_chunk };
    let num_chunks = (file.size_bytes().div_ceil(max_chunk)).max(children.len() as u64) as usize;
    let mut chunks = Vec::with_capacity(num_chunks);
    let mut remaining = file.size_bytes();
    for i in 0..num_chunks {
        let this_size = if i == num_chunks - 1 {
            remaining
        } else {
            (file.size_bytes() / num_chunks as u64).min(max_chunk)
        };
        chunks.push((i % children.len().max(1), this_size));
        remaining = remaining.saturating_sub(this_size);
    }
    chunks
}

/// One stripe of a file: which child it lives on and the location used to
/// address it there.
#[derive(Debug, Clone)]
struct Stripe {
    child_index: usize,
    location: FileLocation,
}

/// Compound (striping) storage service.
pub struct CompoundStorageService {
    name: String,
    sim: wrench_kernel::Simulation,
    children: Vec<Arc<dyn StorageService>>,
    strategy: Option<StorageSelectionStrategy>,
    max_allocation_chunk_size: u64,
    mapping: Mutex<HashMap<String, Vec<Stripe>>>,
    trace: Mutex<Vec<TraceEntry>>,
}

impl CompoundStorageService {
    /// Build a compound service over `children`. With no `strategy`,
    /// `INTERNAL_STRIPING` round-robins chunks of at most
    /// `max_allocation_chunk_size` bytes (`0` meaning unbounded) across the
    /// children. `sim` is used only to timestamp trace entries.
    pub fn new(
        name: impl Into<String>,
        sim: wrench_kernel::Simulation,
        children: Vec<Arc<dyn StorageService>>,
        strategy: Option<StorageSelectionStrategy>,
        max_allocation_chunk_size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            sim,
            children,
            strategy,
            max_allocation_chunk_size,
            mapping: Mutex::new(HashMap::new()),
            trace: Mutex::new(Vec::new()),
        }
    }

    /// The recorded trace, timestamp-monotonic by construction (append-only).
    pub fn trace(&self) -> Vec<TraceEntry> {
        self.trace.lock().clone()
    }

    fn mount_point_for(&self, child_index: usize) -> String {
        format!("/compound/{}/{}", self.name, child_index)
    }

    fn stripe_plan(&self, file: &File) -> Vec<Stripe> {
        let plan = match &self.strategy {
            Some(f) => f(file, &self.children),
            None => internal_striping(self.max_allocation_chunk_size, file, &self.children),
        };
        plan.into_iter()
            .filter(|(idx, _)| *idx < self.children.len())
            .map(|(idx, size)| Stripe {
                child_index: idx,
                location: FileLocation::new(self.children[idx].name(), self.mount_point_for(idx), File::new(file.id(), size)),
            })
            .collect()
    }

    async fn snapshot(&self, file_id: Option<&str>) -> Vec<DiskUsageSnapshot> {
        let mut snapshots = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let free: u64 = child.free_space().await.values().sum();
            snapshots.push(DiskUsageSnapshot {
                service_id: child.name().to_string(),
                free_bytes: free,
                file_id: file_id.map(str::to_string),
                load: 0.0,
            });
        }
        snapshots
    }

    async fn append_trace(&self, action: IoAction, file_id: Option<&str>, locations: Vec<FileLocation>) {
        let ts = self.sim.now();
        let disk_usage = self.snapshot(file_id).await;
        self.trace.lock().push(TraceEntry {
            ts,
            action,
            disk_usage,
            locations,
        });
    }
}

#[async_trait]
impl StorageService for CompoundStorageService {
    fn name(&self) -> &str {
        &self.name
    }

    async fn free_space(&self) -> HashMap<String, u64> {
        let mut total = HashMap::new();
        for child in &self.children {
            for (mount, free) in child.free_space().await {
                *total.entry(format!("{}::{}", child.name(), mount)).or_insert(0) += free;
            }
        }
        total
    }

    async fn lookup(&self, location: &FileLocation) -> bool {
        let stripes = {
            let mapping = self.mapping.lock();
            match mapping.get(location.file.id()) {
                Some(s) => s.clone(),
                None => return false,
            }
        };
        let checks = stripes.iter().map(|s| self.children[s.child_index].lookup(&s.location));
        join_all(checks).await.into_iter().all(|present| present)
    }

    async fn delete(&self, location: &FileLocation) -> Result<(), StorageServiceError> {
        let stripes = {
            let mut mapping = self.mapping.lock();
            mapping
                .remove(location.file.id())
                .ok_or_else(|| StorageServiceError::FileNotFound { location: location.clone() })?
        };
        let locations: Vec<FileLocation> = stripes.iter().map(|s| s.location.clone()).collect();
        self.append_trace(IoAction::DeleteStart, Some(location.file.id()), locations.clone()).await;
        let results = join_all(stripes.iter().map(|s| self.children[s.child_index].delete(&s.location))).await;
        self.append_trace(IoAction::DeleteEnd, Some(location.file.id()), locations).await;
        if results.iter().any(Result::is_err) {
            return Err(StorageServiceError::FileNotFound { location: location.clone() });
        }
        Ok(())
    }

    async fn write(&self, location: &FileLocation) -> Result<(), StorageServiceError> {
        let stripes = self.stripe_plan(&location.file);
        let locations: Vec<FileLocation> = stripes.iter().map(|s| s.location.clone()).collect();
        self.mapping.lock().insert(location.file.id().to_string(), stripes.clone());
        self.append_trace(IoAction::WriteStart, Some(location.file.id()), locations.clone()).await;

        let results = join_all(stripes.iter().map(|s| self.children[s.child_index].write(&s.location))).await;

        if let Some(first_err) = results.into_iter().find_map(Result::err) {
            // Roll back the stripes that did succeed and drop the mapping,
            // so a subsequent lookup correctly reports "not present"
            // (spec.md E6).
            for s in &stripes {
                let _ = self.children[s.child_index].delete(&s.location).await;
            }
            self.mapping.lock().remove(location.file.id());
            return Err(first_err);
        }

        self.append_trace(IoAction::WriteEnd, Some(location.file.id()), locations).await;
        Ok(())
    }

    async fn read(&self, location: &FileLocation) -> Result<(), StorageServiceError> {
        let stripes = {
            let mapping = self.mapping.lock();
            mapping
                .get(location.file.id())
                .cloned()
                .ok_or_else(|| StorageServiceError::FileNotFound { location: location.clone() })?
        };
        let locations: Vec<FileLocation> = stripes.iter().map(|s| s.location.clone()).collect();
        self.append_trace(IoAction::ReadStart, Some(location.file.id()), locations.clone()).await;
        let results = join_all(stripes.iter().map(|s| self.children[s.child_index].read(&s.location))).await;
        self.append_trace(IoAction::ReadEnd, Some(location.file.id()), locations).await;
        if let Some(err) = results.into_iter().find_map(Result::err) {
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BufferMode, DiskSpec, SimpleStorageService};
    use wrench_kernel::host::{HostId, HostSpec};
    use wrench_kernel::{KernelConfig, Simulation};

    fn make_simple(name: &str) -> Arc<SimpleStorageService> {
        let sim = Simulation::new(KernelConfig::default());
        let host = HostId::new(format!("Host-{name}"));
        sim.hosts().add_host(host.clone(), HostSpec::new(1, 1.0, 1));
        let svc = SimpleStorageService::new(name, host, sim, BufferMode::Fluid);
        svc.add_mount(
            format!("/compound/compound1/{name}"),
            DiskSpec {
                capacity_bytes: 10_000_000,
                read_bandwidth: 1_000_000.0,
                write_bandwidth: 1_000_000.0,
            },
        );
        Arc::new(svc)
    }

    #[tokio::test]
    async fn write_then_read_round_trips_across_stripes() {
        let s1 = make_simple("S1");
        let s2 = make_simple("S2");
        let compound = CompoundStorageService::new(
            "compound1",
            Simulation::new(KernelConfig::default()),
            vec![s1.clone(), s2.clone()],
            None,
            0,
        );

        let loc = FileLocation::new("compound1", "ignored", File::new("f1", 1000));
        compound.write(&loc).await.unwrap();
        assert!(compound.lookup(&loc).await);
        compound.read(&loc).await.unwrap();
        assert_eq!(compound.trace().len(), 4);
    }

    #[tokio::test]
    async fn write_failure_on_one_child_rolls_back_the_mapping() {
        let s1 = make_simple("S1");
        // s2 has zero capacity, so its stripe write always fails.
        let s2_sim = Simulation::new(KernelConfig::default());
        let s2_host = HostId::new("Host-S2-full");
        s2_sim.hosts().add_host(s2_host.clone(), HostSpec::new(1, 1.0, 1));
        let s2 = Arc::new(SimpleStorageService::new("S2", s2_host, s2_sim, BufferMode::Fluid));
        s2.add_mount(
            "/compound/compound1/S2",
            DiskSpec {
                capacity_bytes: 0,
                read_bandwidth: 1.0,
                write_bandwidth: 1.0,
            },
        );

        let compound = CompoundStorageService::new("compound1", Simulation::new(KernelConfig::default()), vec![s1, s2], None, 0);
        let loc = FileLocation::new("compound1", "ignored", File::new("f1", 1000));

        assert!(compound.write(&loc).await.is_err());
        assert!(!compound.lookup(&loc).await);
    }
}
