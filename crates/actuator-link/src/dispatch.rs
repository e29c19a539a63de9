//! Non-blocking alert dispatch
//!
//! Each `EnterAlerting` event becomes one spawned task that drives the
//! actuator through ACTIVATE → dwell → DEACTIVATE. The detection loop never
//! waits on the dwell, and the shared serial transport is guarded by a
//! single-flight lock so concurrent dispatch tasks cannot interleave
//! command bytes.

use crate::command::AlertCommand;
use crate::link::ActuatorLink;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncWrite;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Fire-and-forget dispatcher over a shared actuator link.
///
/// Overlapping triggers queue on the link lock rather than interleaving or
/// being dropped; the upstream latch keeps the queue depth at one in
/// practice. In-flight tasks are tracked so an orderly shutdown can drain
/// them, but normal shutdown does not wait (the sequence is bounded).
pub struct AlertDispatcher<T> {
    link: Arc<AsyncMutex<ActuatorLink<T>>>,
    dwell: Duration,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: AsyncWrite + Unpin + Send + 'static> AlertDispatcher<T> {
    pub fn new(link: ActuatorLink<T>, dwell: Duration) -> Self {
        Self {
            link: Arc::new(AsyncMutex::new(link)),
            dwell,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Launch one alert sequence. Returns immediately.
    ///
    /// Serial write failures are logged and swallowed inside the task; they
    /// never reach the caller.
    pub fn trigger(&self) {
        let link = Arc::clone(&self.link);
        let dwell = self.dwell;

        let handle = tokio::spawn(async move {
            // Held across the whole sequence: the single-flight guard.
            let mut link = link.lock().await;

            if let Err(e) = link.send(AlertCommand::Activate).await {
                warn!(error = %e, "Alert activation write failed");
                return;
            }
            tokio::time::sleep(dwell).await;
            if let Err(e) = link.send(AlertCommand::Deactivate).await {
                warn!(error = %e, "Alert deactivation write failed");
            }
        });

        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.retain(|h| !h.is_finished());
            in_flight.push(handle);
        }
        debug!("Alert sequence dispatched");
    }

    /// Wait for every in-flight alert sequence to finish.
    ///
    /// Optional: callers that exit without draining leak at most one
    /// bounded-duration task.
    pub async fn drain(&self) {
        let handles: Vec<JoinHandle<()>> = match self.in_flight.lock() {
            Ok(mut in_flight) => in_flight.drain(..).collect(),
            Err(_) => Vec::new(),
        };
        for handle in handles {
            let _ = handle.await;
        }
    }

    /// Number of dispatch tasks not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight
            .lock()
            .map(|v| v.iter().filter(|h| !h.is_finished()).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryTransport;

    #[tokio::test(start_paused = true)]
    async fn test_sequence_is_activate_dwell_deactivate() {
        let transport = MemoryTransport::new();
        let link = ActuatorLink::from_transport(transport.clone());
        let dispatcher = AlertDispatcher::new(link, Duration::from_secs(5));

        dispatcher.trigger();
        dispatcher.drain().await;

        let writes = transport.timed_writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].0, 0x31);
        assert_eq!(writes[1].0, 0x30);
        assert!(writes[1].1 - writes[0].1 >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_triggers_do_not_interleave() {
        let transport = MemoryTransport::new();
        let link = ActuatorLink::from_transport(transport.clone());
        let dispatcher = AlertDispatcher::new(link, Duration::from_millis(50));

        // Second trigger lands while the first dwell is still running
        dispatcher.trigger();
        dispatcher.trigger();
        dispatcher.drain().await;

        assert_eq!(transport.bytes(), vec![0x31, 0x30, 0x31, 0x30]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_does_not_block_caller() {
        let transport = MemoryTransport::new();
        let link = ActuatorLink::from_transport(transport.clone());
        let dispatcher = AlertDispatcher::new(link, Duration::from_secs(5));

        dispatcher.trigger();
        // The caller observes no writes yet: the sequence runs elsewhere.
        assert!(transport.bytes().len() <= 1);
        assert_eq!(dispatcher.in_flight(), 1);

        dispatcher.drain().await;
        assert_eq!(dispatcher.in_flight(), 0);
    }
}
