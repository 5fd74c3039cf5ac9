//! Named rendezvous registry: maps a mailbox name to the host it lives
//! on and the sender half an actor registered for it.
//!
//! `wrench-rt`'s mailboxes are anonymous in-process queues; this is the
//! layer that lets one actor address another purely by name, the way
//! spec.md's `mailbox_put(m, msg)` contract expects.

use dashmap::DashMap;

use crate::host::HostId;
use wrench_rt::mailbox::BoundedMailboxSender;
use wrench_rt::message::Message;

/// Registry of named mailboxes, each pinned to the host its owning actor
/// runs on.
pub struct NamedMailboxRegistry<M: Message> {
    entries: DashMap<String, (HostId, BoundedMailboxSender<M>)>,
}

impl<M: Message> Default for NamedMailboxRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Message> NamedMailboxRegistry<M> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Registers `name` as living on `host`, delivering through `sender`.
    /// Replaces any previous registration under the same name.
    pub fn register(&self, name: impl Into<String>, host: HostId, sender: BoundedMailboxSender<M>) {
        self.entries.insert(name.into(), (host, sender));
    }

    /// Removes a mailbox's registration, e.g. when its owning actor stops.
    pub fn unregister(&self, name: &str) {
        self.entries.remove(name);
    }

    /// The host a named mailbox lives on, if registered.
    pub fn host_of(&self, name: &str) -> Option<HostId> {
        self.entries.get(name).map(|entry| entry.0.clone())
    }

    /// The sender half for a named mailbox, if registered.
    pub fn sender_of(&self, name: &str) -> Option<BoundedMailboxSender<M>> {
        self.entries.get(name).map(|entry| entry.1.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrench_rt::mailbox::BoundedMailbox;

    #[derive(Debug, Clone)]
    struct TestMsg;
    impl Message for TestMsg {
        const MESSAGE_KIND: &'static str = "test";
    }

    #[test]
    fn register_then_lookup_round_trips() {
        let registry = NamedMailboxRegistry::<TestMsg>::new();
        let (_mailbox, sender) = BoundedMailbox::<TestMsg>::new(4);
        let host = HostId::new("A");

        registry.register("svc", host.clone(), sender);
        assert_eq!(registry.host_of("svc"), Some(host));
        assert!(registry.sender_of("svc").is_some());
    }

    #[test]
    fn unregistered_name_is_absent() {
        let registry = NamedMailboxRegistry::<TestMsg>::new();
        assert!(registry.host_of("ghost").is_none());
        assert!(registry.sender_of("ghost").is_none());
    }

    #[test]
    fn unregister_removes_the_entry() {
        let registry = NamedMailboxRegistry::<TestMsg>::new();
        let (_mailbox, sender) = BoundedMailbox::<TestMsg>::new(4);
        registry.register("svc", HostId::new("A"), sender);
        registry.unregister("svc");
        assert!(registry.host_of("svc").is_none());
    }
}
