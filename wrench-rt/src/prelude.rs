//! Convenient glob import for building actors on top of this crate.
//!
//! ```rust
//! use wrench_rt::prelude::*;
//! ```

// Core actor system
pub use crate::actor::{Actor, ActorContext, ErrorAction, ServiceLifecycle, ServiceState};

// Messaging
pub use crate::message::{Message, MessageEnvelope};

// Mailbox
pub use crate::mailbox::{
    BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
};

// Termination detection
pub use crate::supervisor::{watch, NotifyOn, TerminationReport};

// Monitoring
pub use crate::monitoring::{EventSeverity, InMemoryMonitor, Monitor, MonitoringEvent, NoopMonitor};

// Utilities
pub use crate::util::{ActorAddress, ActorId, MessageId};
