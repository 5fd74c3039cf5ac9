//! Virtual-time engine: a min-heap of pending wakeups that every
//! suspension point (sleep, compute, mailbox put/get) registers against,
//! instead of the wall clock.

mod error;
mod types;
mod virtual_clock;

pub use error::{KernelError, NetworkErrorKind};
pub use virtual_clock::VirtualClock;
