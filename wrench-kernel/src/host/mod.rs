//! Host identity, static spec, and on/off state.

mod registry;
mod types;

pub use registry::HostRegistry;
pub use types::{HostId, HostSpec};
