//! Host on/off state and the pure physical queries over it.
//!
//! Turning a host off or on is a zero-simulated-time operation that must
//! notify every actor currently suspended on that host (§4.1): a sleeping
//! or computing actor needs to wake up early with a `HostError` the
//! instant its host dies, rather than waiting for its originally
//! scheduled wakeup.

use dashmap::DashMap;
use tokio::sync::oneshot;
use tracing::debug;

use super::types::{HostId, HostSpec};
use crate::clock::VirtualClock;

struct HostEntry {
    spec: HostSpec,
    on: bool,
    off_watchers: Vec<oneshot::Sender<()>>,
    on_watchers: Vec<oneshot::Sender<()>>,
}

/// Registry of every host known to the simulation, plus the ability to
/// watch for a specific host's next off/on transition.
///
/// Reads (`is_host_on`, `host_flop_rate`, ...) are pure queries in zero
/// simulated time (§4.1); they never touch the [`VirtualClock`] held
/// alongside the registry.
pub struct HostRegistry {
    hosts: DashMap<HostId, HostEntry>,
    clock: VirtualClock,
}

impl HostRegistry {
    /// Creates an empty registry sharing the given clock (used only to
    /// tag log lines with the virtual timestamp of a transition).
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            hosts: DashMap::new(),
            clock,
        }
    }

    /// Registers a host, initially ON, with the given static spec.
    pub fn add_host(&self, id: HostId, spec: HostSpec) {
        self.hosts.insert(
            id,
            HostEntry {
                spec,
                on: true,
                off_watchers: Vec::new(),
                on_watchers: Vec::new(),
            },
        );
    }

    /// `true` if the host is ON. Hosts not present in the registry are
    /// treated as OFF (never provisioned).
    pub fn is_host_on(&self, id: &HostId) -> bool {
        self.hosts.get(id).map(|entry| entry.on).unwrap_or(false)
    }

    /// The host's flop rate, or `None` if the host is not registered.
    pub fn host_flop_rate(&self, id: &HostId) -> Option<f64> {
        self.hosts.get(id).map(|entry| entry.spec.flop_rate)
    }

    /// The host's total RAM capacity, or `None` if unregistered.
    pub fn host_mem_capacity(&self, id: &HostId) -> Option<u64> {
        self.hosts.get(id).map(|entry| entry.spec.ram_capacity)
    }

    /// The host's core count, or `None` if unregistered.
    pub fn host_num_cores(&self, id: &HostId) -> Option<u32> {
        self.hosts.get(id).map(|entry| entry.spec.cores)
    }

    /// Turns the host OFF and fires every pending off-watcher.
    ///
    /// Zero simulated time elapses; the clock is only consulted to stamp
    /// the log line.
    pub fn turn_off_host(&self, id: &HostId) {
        if let Some(mut entry) = self.hosts.get_mut(id) {
            if !entry.on {
                return;
            }
            entry.on = false;
            let watchers = std::mem::take(&mut entry.off_watchers);
            drop(entry);
            debug!(host = %id, now = self.clock.now(), "host turned off");
            for tx in watchers {
                let _ = tx.send(());
            }
        }
    }

    /// Turns the host ON and fires every pending on-watcher.
    pub fn turn_on_host(&self, id: &HostId) {
        if let Some(mut entry) = self.hosts.get_mut(id) {
            if entry.on {
                return;
            }
            entry.on = true;
            let watchers = std::mem::take(&mut entry.on_watchers);
            drop(entry);
            debug!(host = %id, now = self.clock.now(), "host turned on");
            for tx in watchers {
                let _ = tx.send(());
            }
        }
    }

    /// Returns a receiver that resolves the next time `id` transitions
    /// OFF. Resolves immediately (on the next poll) if the host is
    /// already OFF.
    pub fn watch_off(&self, id: &HostId) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        match self.hosts.get_mut(id) {
            Some(mut entry) if !entry.on => {
                let _ = tx.send(());
            }
            Some(mut entry) => entry.off_watchers.push(tx),
            None => {
                let _ = tx.send(());
            }
        }
        rx
    }

    /// Returns a receiver that resolves the next time `id` transitions
    /// ON.
    pub fn watch_on(&self, id: &HostId) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        match self.hosts.get_mut(id) {
            Some(mut entry) if entry.on => {
                let _ = tx.send(());
            }
            Some(mut entry) => entry.on_watchers.push(tx),
            None => {
                // Not provisioned hosts never turn on; drop tx so the
                // watcher observes a closed channel instead of hanging.
            }
        }
        rx
    }
}
