//! Drives a parsed [`HostStateTrace`] against a host's on/off state,
//! repeating forever at the trace's periodicity.

use std::sync::Arc;

use tracing::debug;

use super::trace::HostStateTrace;
use crate::clock::VirtualClock;
use crate::host::{HostId, HostRegistry};

/// Spawns a background task that replays `trace` against `host` forever.
///
/// Each period, the task sleeps to each entry's offset (relative to the
/// period's start) and applies the transition, then sleeps out the
/// remainder of the period before looping. Dropping the returned handle
/// does not stop the task; callers that need to stop a trace early
/// should `abort()` the handle explicitly.
pub fn drive_trace(
    clock: VirtualClock,
    registry: Arc<HostRegistry>,
    host: HostId,
    trace: HostStateTrace,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let mut elapsed = 0.0f64;
            for entry in trace.entries() {
                let dt = entry.at - elapsed;
                if dt > 0.0 {
                    clock.sleep(dt).await;
                    elapsed += dt;
                }
                if entry.on {
                    registry.turn_on_host(&host);
                } else {
                    registry.turn_off_host(&host);
                }
                debug!(host = %host, now = clock.now(), on = entry.on, "trace transition applied");
            }
            let remainder = trace.periodicity() - elapsed;
            if remainder > 0.0 {
                clock.sleep(remainder).await;
            }
        }
    })
}
