//! Service lifecycle state machine: DOWN / UP / SUSPENDED.
//!
//! Generalizes the teacher's `ActorState`/`ActorLifecycle` (which tracked a
//! five-state `Starting/Running/Stopping/Stopped/Failed` progression for a
//! single restart policy) to the three-state machine every service in this
//! system follows, with the transitions named directly after the service
//! contract in spec.md §4.2: `start`, `stop`, `suspend`, `resume`, `kill`,
//! and an implicit host-down transition.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};

// Layer 3: Internal module imports
// (none)

/// A service's current lifecycle state.
///
/// ```text
/// DOWN --start--> UP --suspend--> SUSPENDED --resume--> UP
///  ^                |                                     |
///  |                +--stop/kill--------------------------+--> DOWN
///  +-- host-down while UP --------------------------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Not running; no actor task exists.
    Down,
    /// Running and processing its mailbox.
    Up,
    /// Running but not currently processing new requests; existing state
    /// is preserved.
    Suspended,
}

impl Default for ServiceState {
    fn default() -> Self {
        Self::Down
    }
}

/// Tracks a service's lifecycle state and restart history.
///
/// # Example
/// ```rust
/// use wrench_rt::actor::{ServiceLifecycle, ServiceState};
///
/// let mut lifecycle = ServiceLifecycle::new();
/// assert_eq!(lifecycle.state(), ServiceState::Down);
///
/// lifecycle.transition_to(ServiceState::Up);
/// assert!(lifecycle.is_up());
///
/// // A host-down event (or explicit kill) sends it back to Down, and a
/// // subsequent autorestart is reflected in restart_count.
/// lifecycle.transition_to(ServiceState::Down);
/// lifecycle.transition_to(ServiceState::Up);
/// assert_eq!(lifecycle.restart_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceLifecycle {
    state: ServiceState,
    last_state_change: DateTime<Utc>,
    restart_count: u32,
    has_started: bool,
}

impl ServiceLifecycle {
    /// A new lifecycle tracker, starting `Down`.
    pub fn new() -> Self {
        Self {
            state: ServiceState::Down,
            last_state_change: Utc::now(),
            restart_count: 0,
            has_started: false,
        }
    }

    /// Move to a new state, recording the transition time. Transitioning
    /// `Down -> Up` after at least one prior `Down -> Up` counts as a
    /// restart; the very first start does not.
    pub fn transition_to(&mut self, new_state: ServiceState) {
        if new_state == ServiceState::Up && self.state == ServiceState::Down {
            if self.has_started {
                self.restart_count += 1;
            }
            self.has_started = true;
        }
        self.state = new_state;
        self.last_state_change = Utc::now();
    }

    /// Current state.
    pub fn state(&self) -> ServiceState {
        self.state
    }

    /// Timestamp of the most recent transition.
    pub fn last_state_change(&self) -> DateTime<Utc> {
        self.last_state_change
    }

    /// Number of times the service has been restarted after its first run.
    pub fn restart_count(&self) -> u32 {
        self.restart_count
    }

    /// Whether the service is currently `Up`.
    pub fn is_up(&self) -> bool {
        self.state == ServiceState::Up
    }
}

impl Default for ServiceLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lifecycle_starts_down() {
        let lifecycle = ServiceLifecycle::new();
        assert_eq!(lifecycle.state(), ServiceState::Down);
        assert_eq!(lifecycle.restart_count(), 0);
    }

    #[test]
    fn first_start_is_not_a_restart() {
        let mut lifecycle = ServiceLifecycle::new();
        lifecycle.transition_to(ServiceState::Up);
        assert_eq!(lifecycle.restart_count(), 0);
    }

    #[test]
    fn suspend_and_resume_round_trip() {
        let mut lifecycle = ServiceLifecycle::new();
        lifecycle.transition_to(ServiceState::Up);
        lifecycle.transition_to(ServiceState::Suspended);
        assert_eq!(lifecycle.state(), ServiceState::Suspended);
        assert!(!lifecycle.is_up());
        lifecycle.transition_to(ServiceState::Up);
        assert!(lifecycle.is_up());
    }

    #[test]
    fn is_up_reflects_state() {
        let mut lifecycle = ServiceLifecycle::new();
        assert!(!lifecycle.is_up());
        lifecycle.transition_to(ServiceState::Up);
        assert!(lifecycle.is_up());
    }

    #[test]
    fn state_default_is_down() {
        assert_eq!(ServiceState::default(), ServiceState::Down);
    }
}
