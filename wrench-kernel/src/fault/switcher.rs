//! Manual host/link on-off switchers: toggled directly by a test or
//! scenario driver, with no scheduling of their own. Grounded in
//! `ResourceSwitcher.{h,cpp}`: a thin wrapper that exists mainly so
//! failure-fabric code has one uniform "target" type regardless of
//! whether the underlying resource is a host or a link.

use crate::host::{HostId, HostRegistry};
use crate::link::{LinkId, LinkRegistry};

/// Either kind of resource a switcher can act on.
#[derive(Debug, Clone)]
pub enum ResourceTarget {
    /// A host, identified by id.
    Host(HostId),
    /// A link, identified by id.
    Link(LinkId),
}

/// Turns a single resource off and on, driven against the shared host and
/// link registries.
pub struct ResourceSwitcher<'a> {
    hosts: &'a HostRegistry,
    links: &'a LinkRegistry,
    target: ResourceTarget,
}

impl<'a> ResourceSwitcher<'a> {
    /// Builds a switcher for the given target resource.
    pub fn new(hosts: &'a HostRegistry, links: &'a LinkRegistry, target: ResourceTarget) -> Self {
        Self { hosts, links, target }
    }

    /// Turns the target resource off.
    pub fn turn_off(&self) {
        match &self.target {
            ResourceTarget::Host(id) => self.hosts.turn_off_host(id),
            ResourceTarget::Link(id) => self.links.turn_off_link(id),
        }
    }

    /// Turns the target resource on.
    pub fn turn_on(&self) {
        match &self.target {
            ResourceTarget::Host(id) => self.hosts.turn_on_host(id),
            ResourceTarget::Link(id) => self.links.turn_on_link(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;
    use crate::host::HostSpec;

    #[test]
    fn switcher_toggles_its_host_target() {
        let clock = VirtualClock::new();
        let hosts = HostRegistry::new(clock.clone());
        let links = LinkRegistry::new(clock);
        let host = HostId::new("A");
        hosts.add_host(host.clone(), HostSpec::new(1, 1.0, 1));

        let switcher = ResourceSwitcher::new(&hosts, &links, ResourceTarget::Host(host.clone()));
        switcher.turn_off();
        assert!(!hosts.is_host_on(&host));
        switcher.turn_on();
        assert!(hosts.is_host_on(&host));
    }
}
