//! # wrench-kernel — simulation-physics adapter
//!
//! A thin stand-in for the discrete-event physics engine spec.md names
//! as an external collaborator: a virtual clock, host/link state, a
//! small hand-written platform-description parser, and the transport
//! layer that gives `wrench-rt` mailboxes transmission delay and
//! host/link failure semantics. `wrench-services` builds the compute,
//! storage, and transfer service family on top of this.
//!
//! # Quick start
//!
//! ```rust
//! use wrench_kernel::{KernelConfig, Simulation};
//! use wrench_kernel::host::{HostId, HostSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sim = Simulation::new(KernelConfig::default());
//!     let host = HostId::new("StableHost");
//!     sim.hosts().add_host(host.clone(), HostSpec::new(4, 1e9, 1 << 30));
//!
//!     let sim_for_sleeper = sim.clone();
//!     let host_for_sleeper = host.clone();
//!     let sleeper = tokio::spawn(async move {
//!         sim_for_sleeper.sleep(&host_for_sleeper, 10.0).await
//!     });
//!
//!     tokio::task::yield_now().await;
//!     sim.clock().advance();
//!     assert!(sleeper.await.unwrap().is_ok());
//!     assert_eq!(sim.now(), 10.0);
//! }
//! ```
//!
//! # Module organization
//!
//! - [`clock`] — the virtual-time min-heap and `KernelError`
//! - [`host`] / [`link`] — resource identity, static spec, on/off state
//! - [`mailbox`] — named rendezvous registry and transmission-aware transport
//! - [`platform`] — host-state-trace parsing and replay
//! - [`fault`] — manual and random-repeat host/link switchers
//! - [`config`] — `KernelConfig` and its validated builder
//! - [`Simulation`] — the facade tying clock/host/link together

pub mod clock;
pub mod config;
pub mod fault;
pub mod host;
pub mod link;
pub mod mailbox;
pub mod platform;

mod simulation;

pub use clock::KernelError;
pub use config::{KernelConfig, KernelConfigBuilder, KernelConfigError};
pub use simulation::Simulation;
