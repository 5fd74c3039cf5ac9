//! `Simulation`: the facade that ties the clock, host registry, and link
//! registry together into the upward-facing contract spec.md §4.1
//! describes (`now`, `sleep`, `compute`, the pure queries, and the
//! on/off operations). `mailbox_put`/`mailbox_get` are exposed
//! separately through [`crate::mailbox::Transport`] since they are
//! parameterized over a domain message type this crate knows nothing
//! about.

use std::sync::Arc;

use crate::clock::{KernelError, VirtualClock};
use crate::config::KernelConfig;
use crate::host::{HostId, HostRegistry};
use crate::link::{LinkId, LinkRegistry};

/// Shared simulation state: virtual clock plus host/link registries.
///
/// Cheaply cloneable — every actor task holds its own clone and talks to
/// the same underlying registries.
#[derive(Clone)]
pub struct Simulation {
    clock: VirtualClock,
    hosts: Arc<HostRegistry>,
    links: Arc<LinkRegistry>,
    config: Arc<KernelConfig>,
}

impl Simulation {
    /// Builds a simulation over empty host/link registries.
    pub fn new(config: KernelConfig) -> Self {
        let clock = VirtualClock::new();
        let hosts = Arc::new(HostRegistry::new(clock.clone()));
        let links = Arc::new(LinkRegistry::new(clock.clone()));
        Self {
            clock,
            hosts,
            links,
            config: Arc::new(config),
        }
    }

    /// The shared virtual clock.
    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    /// The shared host registry.
    pub fn hosts(&self) -> &HostRegistry {
        &self.hosts
    }

    /// The shared host registry, as an `Arc`, for handing to background
    /// tasks (trace drivers, switchers) that must outlive any borrow.
    pub fn hosts_arc(&self) -> Arc<HostRegistry> {
        self.hosts.clone()
    }

    /// The shared link registry.
    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    /// The shared link registry, as an `Arc`.
    pub fn links_arc(&self) -> Arc<LinkRegistry> {
        self.links.clone()
    }

    /// The kernel configuration this simulation was built with.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Current virtual time, in seconds.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Suspends the caller for `dt` virtual seconds, or fails early with
    /// [`KernelError::HostError`] if `host` transitions OFF first.
    pub async fn sleep(&self, host: &HostId, dt: f64) -> Result<(), KernelError> {
        let off = self.hosts.watch_off(host);
        tokio::select! {
            biased;
            _ = off => Err(KernelError::HostError { host: host.clone() }),
            _ = self.clock.sleep(dt) => {
                if self.hosts.is_host_on(host) {
                    Ok(())
                } else {
                    Err(KernelError::HostError { host: host.clone() })
                }
            }
        }
    }

    /// Suspends the caller for the virtual time `flops / host_flop_rate`
    /// would take, failing early with [`KernelError::HostError`] if
    /// `host` dies mid-computation.
    pub async fn compute(&self, host: &HostId, flops: f64) -> Result<(), KernelError> {
        let flop_rate = self
            .hosts
            .host_flop_rate(host)
            .filter(|rate| *rate > 0.0)
            .ok_or_else(|| KernelError::HostError { host: host.clone() })?;
        self.sleep(host, flops / flop_rate).await
    }

    /// Turns a host off (zero simulated time).
    pub fn turn_off_host(&self, host: &HostId) {
        self.hosts.turn_off_host(host);
    }

    /// Turns a host on (zero simulated time).
    pub fn turn_on_host(&self, host: &HostId) {
        self.hosts.turn_on_host(host);
    }

    /// Turns a link off (zero simulated time).
    pub fn turn_off_link(&self, link: &LinkId) {
        self.links.turn_off_link(link);
    }

    /// Turns a link on (zero simulated time).
    pub fn turn_on_link(&self, link: &LinkId) {
        self.links.turn_on_link(link);
    }

    /// `true` if the host is currently on.
    pub fn is_host_on(&self, host: &HostId) -> bool {
        self.hosts.is_host_on(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostSpec;

    fn simulation_with_host(id: &HostId, spec: HostSpec) -> Simulation {
        let sim = Simulation::new(KernelConfig::default());
        sim.hosts.add_host(id.clone(), spec);
        sim
    }

    #[tokio::test]
    async fn sleep_completes_normally_when_host_stays_up() {
        let host = HostId::new("A");
        let sim = simulation_with_host(&host, HostSpec::new(1, 1.0, 1));

        let sim_for_sleep = sim.clone();
        let host_for_sleep = host.clone();
        let sleeper = tokio::spawn(async move { sim_for_sleep.sleep(&host_for_sleep, 5.0).await });

        tokio::task::yield_now().await;
        sim.clock().advance();
        assert!(sleeper.await.unwrap().is_ok());
        assert_eq!(sim.now(), 5.0);
    }

    #[tokio::test]
    async fn sleep_fails_with_host_error_when_host_dies_first() {
        let host = HostId::new("A");
        let sim = simulation_with_host(&host, HostSpec::new(1, 1.0, 1));

        let sim_for_sleep = sim.clone();
        let host_for_sleep = host.clone();
        let sleeper = tokio::spawn(async move { sim_for_sleep.sleep(&host_for_sleep, 5.0).await });

        tokio::task::yield_now().await;
        sim.turn_off_host(&host);

        let result = sleeper.await.unwrap();
        assert!(matches!(result, Err(KernelError::HostError { .. })));
    }

    #[tokio::test]
    async fn compute_scales_by_flop_rate() {
        let host = HostId::new("A");
        let sim = simulation_with_host(&host, HostSpec::new(1, 2.0, 1));

        let sim_for_compute = sim.clone();
        let host_for_compute = host.clone();
        let worker = tokio::spawn(async move { sim_for_compute.compute(&host_for_compute, 10.0).await });

        tokio::task::yield_now().await;
        sim.clock().advance();
        assert!(worker.await.unwrap().is_ok());
        assert_eq!(sim.now(), 5.0);
    }

    #[tokio::test]
    async fn compute_on_off_host_fails_immediately() {
        let host = HostId::new("A");
        let sim = simulation_with_host(&host, HostSpec::new(1, 2.0, 1));
        sim.turn_off_host(&host);

        let result = sim.compute(&host, 10.0).await;
        assert!(matches!(result, Err(KernelError::HostError { .. })));
    }
}
