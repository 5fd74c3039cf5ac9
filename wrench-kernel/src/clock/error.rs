//! Errors surfaced by suspension points (`sleep`, `compute`, mailbox
//! put/get) that the virtual clock arbitrates.

use thiserror::Error;

use crate::host::HostId;
use crate::link::LinkId;

/// Errors the kernel adapter can report to a suspended actor.
///
/// Mirrors spec.md §7's taxonomy for the subset the kernel itself raises;
/// higher layers (`wrench-services`) wrap this into their own richer error
/// enums via `#[from]`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The host running the current actor (or the host targeted by a pure
    /// query) is OFF.
    #[error("host '{host}' is off")]
    HostError {
        /// The affected host.
        host: HostId,
    },

    /// A mailbox put/get failed because of a network-level condition.
    #[error("network error ({kind}) delivering to '{mailbox}'")]
    NetworkError {
        /// Named mailbox the operation targeted.
        mailbox: String,
        /// Specific network failure.
        kind: NetworkErrorKind,
    },

    /// A `mailbox_get` with a timeout expired before a message arrived.
    #[error("timed out waiting on mailbox '{mailbox}'")]
    Timeout {
        /// Named mailbox the operation targeted.
        mailbox: String,
    },
}

/// Specific ways a network-facing operation can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkErrorKind {
    /// A link on the route between sender and receiver is OFF.
    LinkDown(LinkId),
    /// The destination host is OFF, or no actor is listening on the named
    /// mailbox.
    DestinationUnreachable,
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinkDown(link) => write!(f, "link '{link}' is down"),
            Self::DestinationUnreachable => write!(f, "destination unreachable"),
        }
    }
}
