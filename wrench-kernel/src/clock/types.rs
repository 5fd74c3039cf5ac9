//! Heap entries for the virtual clock's pending-wakeup queue.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use tokio::sync::oneshot;

/// A single pending suspension waiting to be resumed at a future virtual
/// timestamp.
///
/// Ordered first by `time`, then by `seq` (assignment order) so that two
/// wakeups scheduled for the identical timestamp fire in the order they
/// were registered — matching the deterministic "events at the same
/// instant are processed FIFO" expectation of a discrete-event simulator.
pub(super) struct Wakeup {
    pub(super) time: OrderedFloat<f64>,
    pub(super) seq: u64,
    pub(super) tx: oneshot::Sender<()>,
}

impl PartialEq for Wakeup {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl Eq for Wakeup {}

impl PartialOrd for Wakeup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Wakeup {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wakeup(time: f64, seq: u64) -> Wakeup {
        let (tx, _rx) = oneshot::channel();
        Wakeup {
            time: OrderedFloat(time),
            seq,
            tx,
        }
    }

    #[test]
    fn orders_by_time_then_sequence() {
        let earlier = wakeup(1.0, 5);
        let later = wakeup(2.0, 0);
        assert!(earlier < later);

        let first = wakeup(3.0, 0);
        let second = wakeup(3.0, 1);
        assert!(first < second);
    }
}
