//! Repeatedly toggles a host or link off, then back on, at random
//! virtual-time intervals drawn from configurable distributions.
//!
//! Grounded directly in `ResourceRandomRepeatSwitcher.{h,cpp}` /
//! `HostRandomRepeatSwitcher.cpp`: a Mersenne-Twister-seeded uniform
//! distribution governs how long the resource stays up versus down, and
//! the loop runs forever until the task is aborted.

use std::sync::Arc;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use super::switcher::ResourceTarget;
use crate::clock::VirtualClock;
use crate::host::HostRegistry;
use crate::link::LinkRegistry;

/// Bounds for the two uniform distributions a [`RandomRepeatSwitcher`]
/// draws from: how long the resource stays up before being turned off,
/// and how long it stays down before being turned back on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomRepeatConfig {
    /// Minimum virtual seconds to wait before turning the resource off.
    pub min_sleep_before_off: f64,
    /// Maximum virtual seconds to wait before turning the resource off.
    pub max_sleep_before_off: f64,
    /// Minimum virtual seconds to wait before turning the resource back on.
    pub min_sleep_before_on: f64,
    /// Maximum virtual seconds to wait before turning the resource back on.
    pub max_sleep_before_on: f64,
}

/// Spawns a task that repeatedly sleeps for a random interval, turns
/// `target` off, sleeps for another random interval, turns it back on,
/// and loops forever.
///
/// The returned handle is never expected to resolve on its own; callers
/// hold onto it only to `abort()` the switcher when a scenario ends.
pub fn spawn(
    clock: VirtualClock,
    hosts: Arc<HostRegistry>,
    links: Arc<LinkRegistry>,
    target: ResourceTarget,
    config: RandomRepeatConfig,
    seed: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = SmallRng::seed_from_u64(seed);
        let off_dist = Uniform::new_inclusive(config.min_sleep_before_off, config.max_sleep_before_off);
        let on_dist = Uniform::new_inclusive(config.min_sleep_before_on, config.max_sleep_before_on);

        loop {
            let sleep_before_off = off_dist.sample(&mut rng);
            clock.sleep(sleep_before_off).await;
            apply_off(&hosts, &links, &target);
            info!(now = clock.now(), ?target, "resource switched off");

            let sleep_before_on = on_dist.sample(&mut rng);
            clock.sleep(sleep_before_on).await;
            apply_on(&hosts, &links, &target);
            info!(now = clock.now(), ?target, "resource switched on");
        }
    })
}

fn apply_off(hosts: &HostRegistry, links: &LinkRegistry, target: &ResourceTarget) {
    match target {
        ResourceTarget::Host(id) => hosts.turn_off_host(id),
        ResourceTarget::Link(id) => links.turn_off_link(id),
    }
}

fn apply_on(hosts: &HostRegistry, links: &LinkRegistry, target: &ResourceTarget) {
    match target {
        ResourceTarget::Host(id) => hosts.turn_on_host(id),
        ResourceTarget::Link(id) => links.turn_on_link(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostSpec;

    #[tokio::test]
    async fn toggles_the_target_host_at_least_once() {
        let clock = VirtualClock::new();
        let hosts = Arc::new(HostRegistry::new(clock.clone()));
        let links = Arc::new(LinkRegistry::new(clock.clone()));
        let host = crate::host::HostId::new("A");
        hosts.add_host(host.clone(), HostSpec::new(1, 1.0, 1));

        let config = RandomRepeatConfig {
            min_sleep_before_off: 1.0,
            max_sleep_before_off: 1.0,
            min_sleep_before_on: 2.0,
            max_sleep_before_on: 2.0,
        };
        let handle = spawn(
            clock.clone(),
            hosts.clone(),
            links.clone(),
            ResourceTarget::Host(host.clone()),
            config,
            42,
        );

        tokio::task::yield_now().await;
        assert!(clock.advance()); // t=1: off
        tokio::task::yield_now().await;
        assert!(!hosts.is_host_on(&host));

        assert!(clock.advance()); // t=3: on
        tokio::task::yield_now().await;
        assert!(hosts.is_host_on(&host));

        handle.abort();
    }
}
