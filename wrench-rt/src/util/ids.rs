// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Unique identifier for actors (services, work-unit executors, transfer
/// threads, alarms, termination detectors) in the simulation.
///
/// # Example
/// ```rust
/// use wrench_rt::util::ActorId;
///
/// let a = ActorId::new();
/// let b = ActorId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Generate a new random actor id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for individual messages, used for request/reply
/// correlation and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generate a new random message id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address of an actor: either a named rendezvous endpoint (services and
/// other long-lived actors are addressed by name so a platform description
/// can reference them statically) or an anonymous one (work-unit executors,
/// transfer threads, alarms — spawned and addressed only via the handle
/// returned at spawn time).
///
/// # Example
/// ```rust
/// use wrench_rt::util::ActorAddress;
///
/// let storage = ActorAddress::named("storage_service_1");
/// assert_eq!(storage.name(), Some("storage_service_1"));
///
/// let executor = ActorAddress::anonymous();
/// assert_eq!(executor.name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorAddress {
    /// Named actor, discoverable by a stable string (storage/compute
    /// services, the file registry, scratch services).
    Named { id: ActorId, name: String },
    /// Anonymous, transient actor (work-unit executors, transfer threads,
    /// alarms, termination detectors).
    Anonymous { id: ActorId },
}

impl ActorAddress {
    /// Create a named address.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            id: ActorId::new(),
            name: name.into(),
        }
    }

    /// Create an anonymous address.
    pub fn anonymous() -> Self {
        Self::Anonymous { id: ActorId::new() }
    }

    /// The actor's id, regardless of addressing mode.
    pub fn id(&self) -> &ActorId {
        match self {
            Self::Named { id, .. } => id,
            Self::Anonymous { id } => id,
        }
    }

    /// The actor's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::Anonymous { .. } => None,
        }
    }
}

impl Display for ActorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { id, name } => write!(f, "{name}@{id}"),
            Self::Anonymous { id } => write!(f, "anonymous@{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_is_unique() {
        assert_ne!(ActorId::new(), ActorId::new());
    }

    #[test]
    fn actor_id_roundtrips_uuid() {
        let uuid = Uuid::new_v4();
        let id = ActorId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn named_address_exposes_name() {
        let addr = ActorAddress::named("bare_metal_1");
        assert_eq!(addr.name(), Some("bare_metal_1"));
    }

    #[test]
    fn anonymous_address_has_no_name() {
        let addr = ActorAddress::anonymous();
        assert_eq!(addr.name(), None);
    }

    #[test]
    fn display_formats_contain_id() {
        let addr = ActorAddress::named("x");
        assert!(format!("{addr}").starts_with("x@"));
        let addr = ActorAddress::anonymous();
        assert!(format!("{addr}").starts_with("anonymous@"));
    }
}
