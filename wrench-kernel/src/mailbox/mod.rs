//! Named-mailbox rendezvous and transmission-time-aware transport,
//! layered on top of `wrench-rt`'s in-process mailboxes.

mod registry;
mod transport;

pub use registry::NamedMailboxRegistry;
pub use transport::{recv, Transport};
