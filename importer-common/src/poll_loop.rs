//! Fixed-interval poll loop
//!
//! The loop issues a ticket, hands it to the host to fetch in the
//! background, then sleeps for the interval. A slow fetch therefore never
//! delays the next tick. The host owns the state and decides how tasks and
//! timers run, so the same loop drives the browser widget and the tests.

use crate::config::WidgetConfig;
use crate::error::PollError;
use crate::poller::{PollerState, RequestTicket, ResponseOutcome};
use crate::snapshot::StatusSnapshot;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Runtime the poll loop runs on
pub trait PollHost {
    /// Mutate the state. `None` if the state is gone.
    fn update<R>(&mut self, f: impl FnOnce(&mut PollerState) -> R) -> Option<R>;

    /// Read the state without notifying subscribers. `None` if it is gone.
    fn read<R>(&self, f: impl FnOnce(&PollerState) -> R) -> Option<R>;

    /// Fetch `ticket` in the background and feed the result to
    /// [`apply_fetch_result`].
    fn spawn_fetch(&mut self, ticket: RequestTicket);

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Poll until the state is disposed, gone, or (when configured) finished.
/// The first ticket is issued immediately.
pub async fn run_poll_loop<H: PollHost>(mut host: H, config: WidgetConfig) {
    info!(
        interval_ms = config.poll_interval_ms,
        "Starting import status polling"
    );

    loop {
        let Some(Some(ticket)) = host.update(|s| s.begin_request(&config)) else {
            break;
        };
        host.spawn_fetch(ticket);

        host.sleep(config.poll_interval()).await;

        let keep_going = host
            .read(|s| {
                if let Some(e) = s.last_error() {
                    warn!(
                        failures = s.consecutive_failures(),
                        "Import status still unavailable: {e}"
                    );
                }
                s.should_continue(&config)
            })
            .unwrap_or(false);
        if !keep_going {
            break;
        }
    }

    match host.read(|s| (s.is_finished(), s.is_disposed())) {
        Some((true, _)) => info!("Import finished, polling stopped"),
        Some((_, true)) | None => info!("Widget gone, polling stopped"),
        Some(_) => info!("Import status polling stopped"),
    }
}

/// Record the outcome of one fetch.
pub fn apply_fetch_result(
    state: &mut PollerState,
    seq: u64,
    result: Result<StatusSnapshot, PollError>,
) -> ResponseOutcome {
    match result {
        Ok(snapshot) => {
            let files = snapshot.file_count();
            let layers = snapshot.layer_count();
            let outcome = state.apply_response(seq, snapshot);
            match outcome {
                ResponseOutcome::Accepted => debug!(seq, files, layers, "Applied import status"),
                ResponseOutcome::Stale => warn!(seq, "Discarded out-of-order import status"),
                ResponseOutcome::Disposed => {}
            }
            outcome
        }
        Err(e) => {
            debug!(seq, "Import status poll failed: {e}");
            state.record_failure(seq, e)
        }
    }
}
