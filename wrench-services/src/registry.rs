//! File registry (spec.md §4.6.2): an eventually-updated index from file to
//! its known locations. Not authoritative — storage services are.

use std::collections::BTreeSet;

use dashmap::DashMap;

use wrench_kernel::host::HostId;
use wrench_kernel::Simulation;

use crate::data::FileLocation;

fn location_key(location: &FileLocation) -> String {
    format!("{}::{}::{}", location.storage_service, location.mount_point, location.file.id())
}

/// Index from file id to the set of locations it is known to reside at.
///
/// Add/remove are O(log n) via a sorted-key `BTreeSet` per file. Lookup can
/// optionally simulate a compute cost (`LOOKUP_COMPUTE_COST`) by spending
/// flops on a caller-supplied host before returning.
pub struct FileRegistry {
    entries: DashMap<String, BTreeSet<String>>,
    locations: DashMap<String, FileLocation>,
    lookup_compute_flops: f64,
}

impl FileRegistry {
    /// A registry with no simulated lookup cost.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            locations: DashMap::new(),
            lookup_compute_flops: 0.0,
        }
    }

    /// A registry whose lookups cost `flops` of simulated compute time.
    pub fn with_lookup_compute_cost(flops: f64) -> Self {
        Self {
            entries: DashMap::new(),
            locations: DashMap::new(),
            lookup_compute_flops: flops,
        }
    }

    /// Record that `location` is a place the file may be found.
    pub fn add_entry(&self, location: FileLocation) {
        let key = location_key(&location);
        self.entries
            .entry(location.file.id().to_string())
            .or_default()
            .insert(key.clone());
        self.locations.insert(key, location);
    }

    /// Forget that `location` is a place the file may be found.
    pub fn remove_entry(&self, file_id: &str, location: &FileLocation) {
        let key = location_key(location);
        if let Some(mut set) = self.entries.get_mut(file_id) {
            set.remove(&key);
        }
        self.locations.remove(&key);
    }

    /// All locations currently known for `file_id`, without simulating any
    /// lookup cost.
    pub fn known_locations(&self, file_id: &str) -> Vec<FileLocation> {
        let Some(set) = self.entries.get(file_id) else {
            return Vec::new();
        };
        set.iter().filter_map(|key| self.locations.get(key).map(|l| l.clone())).collect()
    }

    /// Look up `file_id`'s locations, spending the configured compute cost
    /// (if any) on `host` first — so a lookup is observable in virtual time
    /// the same way a real index scan would be.
    pub async fn lookup(&self, file_id: &str, sim: &Simulation, host: &HostId) -> Vec<FileLocation> {
        if self.lookup_compute_flops > 0.0 {
            let _ = sim.compute(host, self.lookup_compute_flops).await;
        }
        self.known_locations(file_id)
    }
}

impl Default for FileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
