//! Link identity, static spec, on/off state, and host-pair routing.

mod registry;
mod types;

pub use registry::LinkRegistry;
pub use types::{LinkId, LinkSpec};
