//! # wrench-services — domain service family
//!
//! The registry, storage, compute, transfer and alarm services that sit on
//! top of `wrench-kernel`'s virtual-time physics: everything a controller
//! actually talks to when it submits a job or asks where a file lives.
//! `wrench-kernel` supplies the clock and host/link state; `wrench-rt`
//! supplies the actor/mailbox substrate; this crate supplies the domain
//! semantics from spec.md §4.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use wrench_kernel::host::HostSpec;
//! use wrench_kernel::{KernelConfig, Simulation};
//! use wrench_services::compute::{BareMetalComputeService, StorageServiceResolver};
//! use wrench_services::data::{StandardJob, Task};
//! use wrench_rt::util::ActorAddress;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sim = Simulation::new(KernelConfig::default());
//!     let host = wrench_kernel::host::HostId::new("H1");
//!     sim.hosts().add_host(host.clone(), HostSpec::new(4, 1e9, 1 << 30));
//!
//!     let resolver: StorageServiceResolver = Arc::new(|_name: &str| None);
//!     let service = BareMetalComputeService::new(
//!         "batch0",
//!         sim.clone(),
//!         vec![host],
//!         resolver,
//!         None,
//!         0.0,
//!         true,
//!         false,
//!         None,
//!     );
//!
//!     let task = Task::new("t1", 1_000.0, 1, 1, 0, vec![], vec![]);
//!     let job = StandardJob::new("job1", vec![task], ActorAddress::named("controller"));
//!     service.submit_standard_job(job, Default::default()).await.unwrap();
//! }
//! ```
//!
//! # Module organization
//!
//! - [`data`] — files, locations, tasks, jobs, compute resource ledgers
//! - [`error`] — the service-level error taxonomy (spec.md §7)
//! - [`events`] — controller-facing event types (spec.md §6.2)
//! - [`registry`] — the eventually-updated file-to-location index
//! - [`storage`] — simple, proxy and compound storage services
//! - [`compute`] — work-unit DAG, executor and bare-metal compute service
//! - [`transfer`] — transfer threads and non-bufferised transactions
//! - [`alarm`] — one-shot sleep-then-deliver actor
//!
//! # Design notes
//!
//! Several protocol round-trips that spec.md frames as a literal
//! mailbox request/answer pair are expressed here as plain async methods
//! instead (storage services, the compute service's submit/terminate
//! calls) — the interesting behaviour is the bookkeeping and failure
//! propagation, not the envelope plumbing `wrench-rt` already provides
//! generically. Where a component genuinely needs actor lifecycle (the
//! work-unit executor's host-death handling, the alarm's sleep-then-fire),
//! it is built on [`wrench_rt::Actor`] directly. See `DESIGN.md` for the
//! full list of such simplifications and why each one was made.

pub mod alarm;
pub mod compute;
pub mod data;
pub mod error;
pub mod events;
pub mod registry;
pub mod storage;
pub mod transfer;

pub use error::{ComputeServiceError, ServiceError, StorageServiceError};
pub use events::ControllerEvent;
