//! Link on/off state and host-pair routing.

use dashmap::DashMap;
use tokio::sync::oneshot;
use tracing::debug;

use super::types::{LinkId, LinkSpec};
use crate::clock::VirtualClock;
use crate::host::HostId;

struct LinkEntry {
    spec: LinkSpec,
    on: bool,
    off_watchers: Vec<oneshot::Sender<()>>,
    on_watchers: Vec<oneshot::Sender<()>>,
}

/// Registry of every link known to the simulation, plus the static route
/// table between host pairs.
///
/// Routes are configured once at platform-ingestion time
/// (`wrench_kernel::platform`) and are read-only afterward; only link
/// on/off state changes at runtime.
pub struct LinkRegistry {
    links: DashMap<LinkId, LinkEntry>,
    routes: DashMap<(HostId, HostId), Vec<LinkId>>,
    clock: VirtualClock,
}

impl LinkRegistry {
    /// Creates an empty registry sharing the given clock.
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            links: DashMap::new(),
            routes: DashMap::new(),
            clock,
        }
    }

    /// Registers a link, initially ON.
    pub fn add_link(&self, id: LinkId, spec: LinkSpec) {
        self.links.insert(
            id,
            LinkEntry {
                spec,
                on: true,
                off_watchers: Vec::new(),
                on_watchers: Vec::new(),
            },
        );
    }

    /// Declares the ordered sequence of links forming the route from
    /// `from` to `to`. Routes are symmetric in this model: registering
    /// `(from, to)` does not imply `(to, from)` is also set, matching the
    /// directed route tables a platform description can express.
    pub fn set_route(&self, from: HostId, to: HostId, links: Vec<LinkId>) {
        self.routes.insert((from, to), links);
    }

    /// The ordered links on the route between two hosts, or `None` if no
    /// route was configured.
    pub fn route(&self, from: &HostId, to: &HostId) -> Option<Vec<LinkId>> {
        self.routes
            .get(&(from.clone(), to.clone()))
            .map(|route| route.clone())
    }

    /// `true` if the link is ON. Unregistered links are treated as OFF.
    pub fn is_link_on(&self, id: &LinkId) -> bool {
        self.links.get(id).map(|entry| entry.on).unwrap_or(false)
    }

    /// The link's static spec, or `None` if unregistered.
    pub fn link_spec(&self, id: &LinkId) -> Option<LinkSpec> {
        self.links.get(id).map(|entry| entry.spec)
    }

    /// `true` if every link on the route between `from` and `to` is ON.
    /// A missing route is treated as unreachable (`false`).
    pub fn route_is_up(&self, from: &HostId, to: &HostId) -> bool {
        match self.route(from, to) {
            Some(links) => links.iter().all(|link| self.is_link_on(link)),
            None => false,
        }
    }

    /// Sum of transmission time across every link on the route, plus
    /// `extra_bytes` of framing overhead folded into the same formula.
    /// Returns `None` if no route is configured.
    pub fn route_transmission_time(
        &self,
        from: &HostId,
        to: &HostId,
        bytes: u64,
    ) -> Option<f64> {
        let links = self.route(from, to)?;
        let mut total = 0.0;
        for link in &links {
            total += self.link_spec(link)?.transmission_time(bytes);
        }
        Some(total)
    }

    /// Turns the link OFF and fires every pending off-watcher.
    pub fn turn_off_link(&self, id: &LinkId) {
        if let Some(mut entry) = self.links.get_mut(id) {
            if !entry.on {
                return;
            }
            entry.on = false;
            let watchers = std::mem::take(&mut entry.off_watchers);
            drop(entry);
            debug!(link = %id, now = self.clock.now(), "link turned off");
            for tx in watchers {
                let _ = tx.send(());
            }
        }
    }

    /// Turns the link ON and fires every pending on-watcher.
    pub fn turn_on_link(&self, id: &LinkId) {
        if let Some(mut entry) = self.links.get_mut(id) {
            if entry.on {
                return;
            }
            entry.on = true;
            let watchers = std::mem::take(&mut entry.on_watchers);
            drop(entry);
            debug!(link = %id, now = self.clock.now(), "link turned on");
            for tx in watchers {
                let _ = tx.send(());
            }
        }
    }

    /// Returns a receiver that resolves the next time `id` transitions
    /// OFF. Resolves immediately if the link is already OFF.
    pub fn watch_off(&self, id: &LinkId) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        match self.links.get_mut(id) {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LinkRegistry {
        LinkRegistry::new(VirtualClock::new())
    }

    #[test]
    fn unregistered_link_is_off_and_routeless() {
        let reg = registry();
        let a = HostId::new("A");
        let b = HostId::new("B");
        assert!(!reg.is_link_on(&LinkId::new("ghost")));
        assert!(!reg.route_is_up(&a, &b));
    }

    #[test]
    fn route_is_up_iff_every_link_is_on() {
        let reg = registry();
        let a = HostId::new("A");
        let b = HostId::new("B");
        reg.add_link(LinkId::new("l1"), LinkSpec::new(100.0, 0.0));
        reg.add_link(LinkId::new("l2"), LinkSpec::new(100.0, 0.0));
        reg.set_route(a.clone(), b.clone(), vec![LinkId::new("l1"), LinkId::new("l2")]);

        assert!(reg.route_is_up(&a, &b));
        reg.turn_off_link(&LinkId::new("l2"));
        assert!(!reg.route_is_up(&a, &b));
    }

    #[test]
    fn route_transmission_time_sums_across_links() {
        let reg = registry();
        let a = HostId::new("A");
        let b = HostId::new("B");
        reg.add_link(LinkId::new("l1"), LinkSpec::new(1000.0, 1.0));
        reg.add_link(LinkId::new("l2"), LinkSpec::new(1000.0, 1.0));
        reg.set_route(a.clone(), b.clone(), vec![LinkId::new("l1"), LinkId::new("l2")]);

        let time = reg.route_transmission_time(&a, &b, 1000).unwrap();
        assert_eq!(time, (1.0 + 1.0) + (1.0 + 1.0));
    }

    #[tokio::test]
    async fn watch_off_fires_on_transition() {
        let reg = registry();
        reg.add_link(LinkId::new("l1"), LinkSpec::new(1.0, 0.0));
        let watcher = reg.watch_off(&LinkId::new("l1"));
        reg.turn_off_link(&LinkId::new("l1"));
        assert!(watcher.await.is_ok());
    }
}
