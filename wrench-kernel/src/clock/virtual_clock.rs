//! The discrete-event virtual clock: every suspension point in the
//! system (`sleep`, `compute`, `mailbox_put`, `mailbox_get`) registers a
//! pending wakeup here instead of touching wall-clock time.
//!
//! Virtual time only ever advances to the timestamp of the
//! next-scheduled wakeup. Nothing here looks at `Instant::now()` or
//! `SystemTime::now()` — real time elapsed while driving the simulation
//! is irrelevant (Non-goal: wall-clock correctness).

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use ordered_float::OrderedFloat;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::types::Wakeup;

struct ClockState {
    now: OrderedFloat<f64>,
    heap: BinaryHeap<Reverse<Wakeup>>,
    next_seq: u64,
}

/// Shared handle to the simulation's virtual clock.
///
/// Cloning is cheap (`Arc` internally) — every actor task holds a clone
/// and registers its own wakeups against the same heap, guarded by a
/// `parking_lot::Mutex` since the critical section never crosses an
/// `.await` (the lock is dropped before the registering task awaits its
/// oneshot receiver).
#[derive(Clone)]
pub struct VirtualClock {
    inner: Arc<Mutex<ClockState>>,
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualClock {
    /// Creates a new clock starting at virtual time `0.0`.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClockState {
                now: OrderedFloat(0.0),
                heap: BinaryHeap::new(),
                next_seq: 0,
            })),
        }
    }

    /// Current virtual time, in seconds.
    pub fn now(&self) -> f64 {
        self.inner.lock().now.0
    }

    /// Suspends the caller until `dt` virtual seconds have elapsed.
    ///
    /// Resolves once [`VirtualClock::advance`] has popped this wakeup and
    /// moved `now()` forward to its timestamp. `dt` must be non-negative;
    /// a negative value schedules the wakeup at the current time (fires
    /// on the next `advance`).
    pub async fn sleep(&self, dt: f64) {
        let rx = self.register(dt.max(0.0));
        // The sender side only ever lives inside this clock's heap; it is
        // dropped (closing the channel) only if the clock itself is
        // dropped with the wakeup still pending, which does not happen
        // while any actor task referencing it is alive.
        let _ = rx.await;
    }

    /// Registers a pending wakeup `dt` seconds from now and returns a
    /// receiver that resolves when [`VirtualClock::advance`] fires it.
    ///
    /// Exposed separately from [`VirtualClock::sleep`] so higher layers
    /// (mailbox timeouts, compute scaling) can race this receiver against
    /// another future (e.g. message arrival) with `tokio::select!`.
    pub(crate) fn register(&self, dt: f64) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        let mut state = self.inner.lock();
        let time = OrderedFloat(state.now.0 + dt.max(0.0));
        let seq = state.next_seq;
        state.next_seq += 1;
        state.heap.push(Reverse(Wakeup { time, seq, tx }));
        rx
    }

    /// Pops the earliest pending wakeup, advances `now()` to its
    /// timestamp, and fires it. Returns `false` if there was nothing
    /// pending (the simulation is idle).
    ///
    /// A dedicated driver task calls this in a loop (yielding between
    /// pops so woken actor tasks get scheduled) to pump the simulation
    /// forward; see `wrench_kernel::platform` for the host-state-trace
    /// driver that shares the same clock.
    pub fn advance(&self) -> bool {
        let next = {
            let mut state = self.inner.lock();
            match state.heap.pop() {
                Some(Reverse(wakeup)) => {
                    state.now = wakeup.time;
                    Some(wakeup)
                }
                None => None,
            }
        };
        match next {
            Some(wakeup) => {
                let _ = wakeup.tx.send(());
                true
            }
            None => false,
        }
    }

    /// Drains every pending wakeup, advancing time to the final one.
    ///
    /// Intended for tests and for shutdown paths where remaining wakeups
    /// should simply be released rather than awaited individually.
    pub fn advance_all(&self) -> usize {
        let mut fired = 0;
        while self.advance() {
            fired += 1;
        }
        fired
    }

    /// `true` if there is at least one pending wakeup.
    pub fn has_pending(&self) -> bool {
        !self.inner.lock().heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = VirtualClock::new();
        assert_eq!(clock.now(), 0.0);
    }

    #[tokio::test]
    async fn sleep_advances_to_scheduled_time() {
        let clock = VirtualClock::new();
        let clock_for_sleeper = clock.clone();

        let sleeper = tokio::spawn(async move {
            clock_for_sleeper.sleep(5.0).await;
        });

        // Give the sleeper a chance to register before we pump the clock.
        tokio::task::yield_now().await;
        assert!(clock.has_pending());
        assert!(clock.advance());
        assert_eq!(clock.now(), 5.0);

        sleeper.await.unwrap();
    }

    #[tokio::test]
    async fn wakeups_fire_in_time_order_regardless_of_registration_order() {
        let clock = VirtualClock::new();
        let late_rx = clock.register(10.0);
        let early_rx = clock.register(1.0);

        assert!(clock.advance());
        assert_eq!(clock.now(), 1.0);
        assert!(early_rx.await.is_ok());

        assert!(clock.advance());
        assert_eq!(clock.now(), 10.0);
        assert!(late_rx.await.is_ok());
    }

    #[test]
    fn advance_on_idle_clock_returns_false() {
        let clock = VirtualClock::new();
        assert!(!clock.advance());
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn advance_all_drains_every_pending_wakeup() {
        let clock = VirtualClock::new();
        let _a = clock.register(1.0);
        let _b = clock.register(2.0);
        let _c = clock.register(3.0);

        assert_eq!(clock.advance_all(), 3);
        assert_eq!(clock.now(), 3.0);
        assert!(!clock.has_pending());
    }
}
