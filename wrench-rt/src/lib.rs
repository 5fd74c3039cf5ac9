//! # wrench-rt — generic actor/service runtime
//!
//! Mailbox-driven actors, lifecycle state tracking, termination detection
//! and event monitoring, independent of any particular simulated domain.
//! `wrench-kernel` builds the virtual-time-aware scheduler on top of these
//! primitives; `wrench-services` builds the compute/storage/transfer
//! service family on top of that.
//!
//! # Quick start
//!
//! ```rust
//! use wrench_rt::prelude::*;
//! use async_trait::async_trait;
//!
//! #[derive(Debug, Clone)]
//! struct Tick;
//! impl Message for Tick {
//!     const MESSAGE_KIND: &'static str = "tick";
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("counter error")]
//! struct CounterError;
//!
//! struct Counter { count: u64 }
//!
//! #[async_trait]
//! impl Actor for Counter {
//!     type Message = Tick;
//!     type Error = CounterError;
//!
//!     async fn handle_message(
//!         &mut self,
//!         _msg: Self::Message,
//!         _ctx: &mut ActorContext<Self::Message>,
//!     ) -> Result<(), Self::Error> {
//!         self.count += 1;
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Module organization
//!
//! - [`actor`] — the `Actor` trait, execution context, lifecycle state
//! - [`message`] — `Message` trait and routing envelope
//! - [`mailbox`] — bounded FIFO mailboxes with backpressure
//! - [`supervisor`] — termination detection (join + crash/terminated report)
//! - [`monitoring`] — severity-filtered event recording
//! - [`util`] — `ActorId`, `ActorAddress`, `MessageId`
//!
//! # Design notes
//!
//! Unlike a general-purpose actor framework, actors here never communicate
//! through a shared broker: every mailbox is looked up by name through
//! `wrench-kernel`'s registry, so `ActorContext` only carries an actor's own
//! address and mailbox sender, not a routing handle to every other actor.
//! This keeps the generic runtime free of any notion of simulated time,
//! hosts, or links — those live entirely in `wrench-kernel`.

pub mod actor;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod supervisor;
pub mod util;

pub mod prelude;

pub use actor::{Actor, ActorContext, ErrorAction, ServiceLifecycle, ServiceState};
pub use mailbox::{
    BoundedMailbox, BoundedMailboxSender, MailboxCapacity, MailboxError, MailboxReceiver,
    MailboxSender, TryRecvError,
};
pub use message::{Message, MessageEnvelope};
pub use monitoring::{
    EventSeverity, InMemoryMonitor, MailboxEvent, MailboxEventKind, Monitor, MonitoringConfig,
    MonitoringError, MonitoringEvent, MonitoringSnapshot, NoopMonitor, ServiceEvent,
    ServiceEventKind,
};
pub use supervisor::{watch, NotifyOn, TerminationReport, TerminationReportMessage};
pub use util::{ActorAddress, ActorId, MessageId};
