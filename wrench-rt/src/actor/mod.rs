//! The `Actor` trait, its execution context, and service lifecycle state.

mod context;
mod lifecycle;
mod traits;

pub use context::ActorContext;
pub use lifecycle::{ServiceLifecycle, ServiceState};
pub use traits::{Actor, ErrorAction};
