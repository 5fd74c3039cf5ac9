//! Identifiers and addressing shared across the actor runtime.

mod ids;
pub mod serde_helpers;

pub use ids::{ActorAddress, ActorId, MessageId};
pub use serde_helpers::duration_serde;
