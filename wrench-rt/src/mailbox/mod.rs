//! Mailbox queuing primitives: capacity, backpressure and FIFO delivery.
//!
//! This module deliberately knows nothing about simulated time or host/link
//! failure — see `wrench-kernel::mailbox` for the named, virtual-time-aware
//! rendezvous layer built on top of [`BoundedMailbox`].

mod bounded;
mod traits;

pub use bounded::{BoundedMailbox, BoundedMailboxSender};
pub use traits::{MailboxCapacity, MailboxError, MailboxReceiver, MailboxSender, TryRecvError};
