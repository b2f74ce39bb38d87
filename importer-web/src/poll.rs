//! Dioxus host for the status poll loop
//!
//! The loop and every fetch run as tasks of the widget's scope, so dropping
//! the widget cancels them; `use_drop` also disposes the state so nothing
//! late is applied.

use crate::api;
use dioxus::prelude::*;
use importer_common::config::MAX_POLL_INTERVAL_MS;
use importer_common::{
    apply_fetch_result, run_poll_loop, JobId, PollHost, PollerState, RequestTicket, WidgetConfig,
};
use std::future::Future;
use std::time::Duration;

/// Start polling for `job_id` and return the state signal the view reads.
///
/// Without a job id no task is started and the state stays empty.
pub fn use_status_poller(config: WidgetConfig, job_id: Option<JobId>) -> Signal<PollerState> {
    let mut state = use_signal(move || PollerState::new(job_id));

    let poll_task = use_hook(move || {
        if state.peek().is_active() {
            Some(spawn(run_poll_loop(SignalHost { state }, config)))
        } else {
            None
        }
    });

    use_drop(move || {
        if let Some(task) = poll_task {
            task.cancel();
        }
        if let Ok(mut s) = state.try_write() {
            s.dispose();
        }
    });

    state
}

#[derive(Clone, Copy)]
struct SignalHost {
    state: Signal<PollerState>,
}

impl PollHost for SignalHost {
    fn update<R>(&mut self, f: impl FnOnce(&mut PollerState) -> R) -> Option<R> {
        let mut s = self.state.try_write().ok()?;
        Some(f(&mut *s))
    }

    fn read<R>(&self, f: impl FnOnce(&PollerState) -> R) -> Option<R> {
        let s = self.state.try_peek().ok()?;
        Some(f(&*s))
    }

    fn spawn_fetch(&mut self, ticket: RequestTicket) {
        spawn(run_ticket(self.state, ticket));
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        sleep(duration)
    }
}

async fn run_ticket(mut state: Signal<PollerState>, ticket: RequestTicket) {
    tracing::debug!(seq = ticket.seq, url = %ticket.url, "Polling import status");

    let result = api::fetch_status(&ticket.url).await;

    if let Ok(mut s) = state.try_write() {
        apply_fetch_result(&mut *s, ticket.seq, result);
    }
}

/// Timer delay in whole milliseconds, capped at what browsers honor.
fn timer_ms(duration: Duration) -> u32 {
    let ms = duration.as_millis().min(u128::from(MAX_POLL_INTERVAL_MS));
    u32::try_from(ms).unwrap_or(u32::MAX)
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::TimeoutFuture::new(timer_ms(duration)).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(Duration::from_millis(u64::from(timer_ms(duration)))).await;
}
