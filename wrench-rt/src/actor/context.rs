// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::mailbox::BoundedMailboxSender;
use crate::message::Message;
use crate::util::ActorAddress;

/// Execution context handed to an [`crate::Actor`] on every call.
///
/// Carries the actor's own address and a sender clone of its own mailbox
/// (so a `handle_message` implementation can re-enqueue work to itself,
/// e.g. a compute service re-running dispatch after processing an event).
pub struct ActorContext<M: Message> {
    address: ActorAddress,
    self_sender: BoundedMailboxSender<M>,
}

impl<M: Message> ActorContext<M> {
    /// Build a context from an address and the actor's own mailbox sender.
    pub fn new(address: ActorAddress, self_sender: BoundedMailboxSender<M>) -> Self {
        Self {
            address,
            self_sender,
        }
    }

    /// This actor's address.
    pub fn address(&self) -> &ActorAddress {
        &self.address
    }

    /// A cheap clone of the sender half of this actor's own mailbox.
    pub fn self_sender(&self) -> BoundedMailboxSender<M> {
        self.self_sender.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailbox::BoundedMailbox;

    #[derive(Debug, Clone)]
    struct M;
    impl Message for M {
        const MESSAGE_KIND: &'static str = "m";
    }

    #[test]
    fn context_exposes_address_and_sender() {
        let (_mailbox, sender) = BoundedMailbox::<M>::new(1);
        let addr = ActorAddress::named("svc");
        let ctx = ActorContext::new(addr.clone(), sender);
        assert_eq!(ctx.address(), &addr);
        let _cloned_sender = ctx.self_sender();
    }
}
