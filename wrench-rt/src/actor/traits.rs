//! Core Actor trait: the one piece of behaviour every service, work-unit
//! executor, transfer thread and alarm in the simulation implements.

// Layer 1: Standard library imports
use std::error::Error;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::context::ActorContext;
use crate::message::Message;

/// An actor is a single-threaded, mailbox-driven unit of behaviour. Its
/// `handle_message` is the only place state is mutated; the kernel
/// guarantees no two calls to it (for the same actor) ever run
/// concurrently, so an implementation never needs its own lock around
/// private state (§5 "cooperative single-threaded actors").
///
/// # Example
/// ```rust
/// use wrench_rt::{Actor, ActorContext, ErrorAction, Message};
/// use async_trait::async_trait;
///
/// #[derive(Debug, Clone)]
/// struct Tick;
/// impl Message for Tick {
///     const MESSAGE_KIND: &'static str = "tick";
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("counter error")]
/// struct CounterError;
///
/// struct Counter { count: u32 }
///
/// #[async_trait]
/// impl Actor for Counter {
///     type Message = Tick;
///     type Error = CounterError;
///
///     async fn handle_message(
///         &mut self,
///         _message: Self::Message,
///         _ctx: &mut ActorContext<Self::Message>,
///     ) -> Result<(), Self::Error> {
///         self.count += 1;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Actor: Send + 'static {
    /// The message type this actor's mailbox carries.
    type Message: Message;

    /// The error type returned by this actor's operations.
    type Error: Error + Send + Sync + 'static;

    /// Process one message. Called at most once at a time per actor.
    async fn handle_message(
        &mut self,
        message: Self::Message,
        ctx: &mut ActorContext<Self::Message>,
    ) -> Result<(), Self::Error>;

    /// Called once before the actor's main loop starts receiving messages.
    /// A failure here prevents the actor from starting at all.
    async fn pre_start(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called exactly once when the actor stops, on both the graceful
    /// (`stop`) and forced (`kill`) paths — this is the "cleanup hook" the
    /// kernel invokes regardless of how the actor's main loop ended
    /// (§5 "Cancellation").
    async fn post_stop(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when `handle_message` returns an error; decides the
    /// supervision outcome.
    async fn on_error(
        &mut self,
        _error: Self::Error,
        _ctx: &mut ActorContext<Self::Message>,
    ) -> ErrorAction {
        ErrorAction::Stop
    }
}

/// Supervision decision returned from [`Actor::on_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Stop the actor permanently (calls `post_stop`, then terminates).
    Stop,
    /// Ignore the error and keep processing messages.
    Resume,
    /// Stop, then `pre_start` again and resume processing.
    Restart,
    /// Propagate the error to whatever is supervising this actor.
    Escalate,
}

impl Default for ErrorAction {
    fn default() -> Self {
        Self::Stop
    }
}
