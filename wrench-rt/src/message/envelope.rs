// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
use super::traits::Message;
use crate::util::ActorAddress;

/// Generic message envelope carrying routing metadata alongside a payload.
///
/// # Example
/// ```rust
/// use wrench_rt::message::{Message, MessageEnvelope};
/// use wrench_rt::util::ActorAddress;
///
/// #[derive(Debug, Clone)]
/// struct Ping;
/// impl Message for Ping {
///     const MESSAGE_KIND: &'static str = "ping";
/// }
///
/// let envelope = MessageEnvelope::new(Ping).with_sender(ActorAddress::anonymous());
/// assert_eq!(envelope.message_kind(), "ping");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope<M: Message> {
    /// The message payload.
    pub payload: M,

    /// The actor that sent this message, if any (used for replies).
    pub sender: Option<ActorAddress>,

    /// Address the recipient should reply to, if different from `sender`.
    pub reply_to: Option<ActorAddress>,

    /// Wall-clock creation timestamp, for monitoring/log correlation only
    /// (simulation semantics never depend on this — they depend on the
    /// kernel's virtual clock).
    pub timestamp: DateTime<Utc>,

    /// Correlation id for request/reply matching.
    pub correlation_id: Option<Uuid>,
}

impl<M: Message> MessageEnvelope<M> {
    /// Wrap a payload with no routing metadata set.
    pub fn new(payload: M) -> Self {
        Self {
            payload,
            sender: None,
            reply_to: None,
            timestamp: Utc::now(),
            correlation_id: None,
        }
    }

    /// Attach a sender address.
    pub fn with_sender(mut self, sender: ActorAddress) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Attach a reply-to address.
    pub fn with_reply_to(mut self, reply_to: ActorAddress) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Attach a correlation id.
    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// The wrapped message's kind identifier.
    pub fn message_kind(&self) -> &'static str {
        M::MESSAGE_KIND
    }

    /// The wrapped message's modelled transmission size in bytes.
    pub fn payload_bytes(&self) -> u64 {
        self.payload.payload_bytes()
    }
}
