// Layer 1: Standard library imports
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::traits::{MailboxCapacity, MailboxError, MailboxReceiver, MailboxSender, TryRecvError};
use crate::message::{Message, MessageEnvelope};

/// Bounded FIFO mailbox backed by a `tokio::sync::mpsc` channel.
///
/// # Example
/// ```rust
/// # use wrench_rt::mailbox::{BoundedMailbox, MailboxReceiver, MailboxSender};
/// # use wrench_rt::message::{Message, MessageEnvelope};
/// # #[derive(Debug, Clone)] struct M;
/// # impl Message for M { const MESSAGE_KIND: &'static str = "m"; }
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (mut mailbox, sender) = BoundedMailbox::<M>::new(8);
/// sender.send(MessageEnvelope::new(M)).await.unwrap();
/// assert!(mailbox.recv().await.is_some());
/// # }
/// ```
pub struct BoundedMailbox<M: Message> {
    receiver: mpsc::Receiver<MessageEnvelope<M>>,
    capacity: usize,
    len: Arc<AtomicUsize>,
}

/// Cloneable sender half of a [`BoundedMailbox`].
#[derive(Clone)]
pub struct BoundedMailboxSender<M: Message> {
    sender: mpsc::Sender<MessageEnvelope<M>>,
    capacity: usize,
    len: Arc<AtomicUsize>,
}

impl<M: Message> BoundedMailbox<M> {
    /// Create a bounded mailbox and its paired sender.
    pub fn new(capacity: usize) -> (Self, BoundedMailboxSender<M>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let len = Arc::new(AtomicUsize::new(0));
        (
            Self {
                receiver: rx,
                capacity,
                len: len.clone(),
            },
            BoundedMailboxSender {
                sender: tx,
                capacity,
                len,
            },
        )
    }
}

#[async_trait]
impl<M: Message> MailboxReceiver<M> for BoundedMailbox<M> {
    type Error = MailboxError;

    async fn recv(&mut self) -> Option<MessageEnvelope<M>> {
        let msg = self.receiver.recv().await;
        if msg.is_some() {
            self.len.fetch_sub(1, Ordering::AcqRel);
        }
        msg
    }

    fn try_recv(&mut self) -> Result<MessageEnvelope<M>, TryRecvError> {
        match self.receiver.try_recv() {
            Ok(msg) => {
                self.len.fetch_sub(1, Ordering::AcqRel);
                Ok(msg)
            }
            Err(mpsc::error::TryRecvError::Empty) => Err(TryRecvError::Empty),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(TryRecvError::Closed),
        }
    }

    fn capacity(&self) -> MailboxCapacity {
        MailboxCapacity::Bounded(self.capacity)
    }

    fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }
}

#[async_trait]
impl<M: Message> MailboxSender<M> for BoundedMailboxSender<M> {
    type Error = MailboxError;

    async fn send(&self, envelope: MessageEnvelope<M>) -> Result<(), Self::Error> {
        self.sender
            .send(envelope)
            .await
            .map_err(|_| MailboxError::Closed)?;
        self.len.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn try_send(&self, envelope: MessageEnvelope<M>) -> Result<(), Self::Error> {
        match self.sender.try_send(envelope) {
            Ok(()) => {
                self.len.fetch_add(1, Ordering::AcqRel);
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => Err(MailboxError::Full {
                capacity: self.capacity,
            }),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(MailboxError::Closed),
        }
    }

    fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
