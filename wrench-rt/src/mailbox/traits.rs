//! Core mailbox traits and supporting types for actor message queuing.
//!
//! A mailbox here is a plain, in-process FIFO queue: ordering, capacity and
//! backpressure live in this crate; the *simulated* cost of getting a
//! message from sender to receiver (transmission delay, link/host failure)
//! is layered on top by `wrench-kernel`, which owns the named rendezvous
//! registry and the virtual clock. Keeping the two separate means this
//! queue can be unit-tested without any notion of simulated time.

// Layer 1: Standard library imports
use std::error::Error;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::message::{Message, MessageEnvelope};

/// Mailbox receiver: owned by exactly one actor, never cloned.
#[async_trait]
pub trait MailboxReceiver<M: Message>: Send {
    /// Error type for mailbox operations.
    type Error: Error + Send + Sync + 'static;

    /// Receive the next message, in FIFO order. Returns `None` once the
    /// mailbox is closed (all senders dropped) and drained.
    async fn recv(&mut self) -> Option<MessageEnvelope<M>>;

    /// Non-blocking receive.
    fn try_recv(&mut self) -> Result<MessageEnvelope<M>, TryRecvError>;

    /// Configured capacity.
    fn capacity(&self) -> MailboxCapacity;

    /// Approximate number of messages currently queued.
    fn len(&self) -> usize;

    /// Whether the mailbox is currently empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mailbox sender: cheaply cloneable, many-to-one.
#[async_trait]
pub trait MailboxSender<M: Message>: Send + Sync + Clone {
    /// Error type for send operations.
    type Error: Error + Send + Sync + 'static;

    /// Send a message, waiting for room if the mailbox applies backpressure
    /// by blocking.
    async fn send(&self, envelope: MessageEnvelope<M>) -> Result<(), Self::Error>;

    /// Non-blocking send.
    fn try_send(&self, envelope: MessageEnvelope<M>) -> Result<(), Self::Error>;

    /// Whether the receiving end has been dropped.
    fn is_closed(&self) -> bool;
}

/// Mailbox capacity configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxCapacity {
    /// Bounded mailbox with a maximum number of queued messages.
    Bounded(usize),
    /// Unbounded mailbox.
    Unbounded,
}

/// Mailbox error kinds.
#[derive(Debug, thiserror::Error)]
pub enum MailboxError {
    /// Mailbox is at capacity (bounded mailboxes only).
    #[error("mailbox is full (capacity: {capacity})")]
    Full { capacity: usize },

    /// Receiver has been dropped; no further messages can be delivered.
    #[error("mailbox is closed")]
    Closed,
}

/// Non-blocking receive error kinds.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TryRecvError {
    /// No message currently queued.
    #[error("mailbox is empty")]
    Empty,
    /// Mailbox closed and drained.
    #[error("mailbox is closed")]
    Closed,
}
