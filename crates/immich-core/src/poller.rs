// ── Background refresh task ──
//
// Drives `ReadingRegistry::refresh_all` on a fixed cadence until
// cancelled. Cancellation is checked between ticks only: a tick that is
// already running finishes its requests first.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::registry::ReadingRegistry;

/// Spawn the refresh loop. The first tick runs immediately.
///
/// A zero `period` runs a single tick and exits.
pub fn spawn_poller(
    registry: Arc<ReadingRegistry>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(poll_task(registry, period, cancel))
}

async fn poll_task(registry: Arc<ReadingRegistry>, period: Duration, cancel: CancellationToken) {
    if period.is_zero() {
        registry.refresh_all().await;
        return;
    }

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(?period, readings = registry.len(), "poller started");

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                debug!("poll tick");
                registry.refresh_all().await;
            }
        }
    }

    info!("poller stopped");
}
