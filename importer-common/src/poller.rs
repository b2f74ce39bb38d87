//! Poller state for one import job
//!
//! All widget state lives in [`PollerState`] and only changes through its
//! methods: issuing a request ticket, applying a response, recording a
//! failure, and disposing. Each ticket carries a sequence number; a response
//! is applied only when it is newer than the last applied one, so a slow
//! early request can never overwrite a later snapshot.

use crate::config::WidgetConfig;
use crate::error::PollError;
use crate::query::query_param;
use crate::snapshot::StatusSnapshot;
use tracing::{debug, info};

/// Opaque identifier of an import job
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Empty ids are treated as absent.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Read the job id from a page query string.
    pub fn from_query(query: &str, param: &str) -> Option<Self> {
        query_param(query, param).and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One issued status request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub url: String,
}

/// What happened to a response handed to [`PollerState`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The response was recorded
    Accepted,
    /// A newer response was already applied; this one was dropped
    Stale,
    /// The widget is gone; nothing was recorded
    Disposed,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PollerState {
    job_id: Option<JobId>,
    snapshot: Option<StatusSnapshot>,
    last_issued_seq: u64,
    last_applied_seq: u64,
    consecutive_failures: u32,
    last_error: Option<PollError>,
    disposed: bool,
}

impl PollerState {
    pub fn new(job_id: Option<JobId>) -> Self {
        Self {
            job_id,
            ..Default::default()
        }
    }

    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    pub fn snapshot(&self) -> Option<&StatusSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn last_error(&self) -> Option<&PollError> {
        self.last_error.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Has a job and has not been disposed.
    pub fn is_active(&self) -> bool {
        self.job_id.is_some() && !self.disposed
    }

    pub fn is_finished(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.is_terminal())
    }

    /// Whether the poll loop should schedule another tick.
    pub fn should_continue(&self, config: &WidgetConfig) -> bool {
        self.is_active() && !(config.stop_when_finished && self.is_finished())
    }

    /// Issue the next request. Returns `None` when there is no job or the
    /// state has been disposed.
    pub fn begin_request(&mut self, config: &WidgetConfig) -> Option<RequestTicket> {
        if self.disposed {
            return None;
        }
        let job_id = self.job_id.as_ref()?;
        self.last_issued_seq += 1;
        Some(RequestTicket {
            seq: self.last_issued_seq,
            url: config.status_url(job_id.as_str()),
        })
    }

    /// Replace the snapshot with the response to ticket `seq`, unless a newer
    /// one has already been applied.
    pub fn apply_response(&mut self, seq: u64, snapshot: StatusSnapshot) -> ResponseOutcome {
        if self.disposed {
            return ResponseOutcome::Disposed;
        }
        if seq <= self.last_applied_seq {
            debug!(
                seq,
                last_applied = self.last_applied_seq,
                "Dropping out-of-order status response"
            );
            return ResponseOutcome::Stale;
        }
        self.last_applied_seq = seq;
        self.consecutive_failures = 0;
        self.last_error = None;
        self.snapshot = Some(snapshot);
        ResponseOutcome::Accepted
    }

    /// Note a failed poll. The snapshot is left untouched.
    pub fn record_failure(&mut self, seq: u64, error: PollError) -> ResponseOutcome {
        if self.disposed {
            return ResponseOutcome::Disposed;
        }
        if seq <= self.last_applied_seq {
            return ResponseOutcome::Stale;
        }
        self.consecutive_failures += 1;
        self.last_error = Some(error);
        ResponseOutcome::Accepted
    }

    /// Stop accepting responses and issuing tickets. Idempotent.
    pub fn dispose(&mut self) {
        if !self.disposed {
            info!(job_id = ?self.job_id, "Import status poller disposed");
            self.disposed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> StatusSnapshot {
        StatusSnapshot::from_json(value.to_string().as_bytes()).unwrap()
    }

    fn job(id: &str) -> Option<JobId> {
        JobId::new(id)
    }

    #[test]
    fn test_job_id_from_query() {
        let id = JobId::from_query("?uploadDataId=42", "uploadDataId").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_empty_job_id_is_absent() {
        assert_eq!(JobId::from_query("?uploadDataId=", "uploadDataId"), None);
        assert_eq!(JobId::new(""), None);
    }

    #[test]
    fn test_no_job_never_issues_requests() {
        let config = WidgetConfig::default();
        let mut state = PollerState::new(JobId::from_query("?other=1", "uploadDataId"));
        assert!(!state.is_active());
        for _ in 0..5 {
            assert_eq!(state.begin_request(&config), None);
        }
        assert!(!state.should_continue(&config));
        assert!(state.snapshot().is_none());
    }

    #[test]
    fn test_tickets_target_job_and_increase() {
        let config = WidgetConfig::default();
        let mut state = PollerState::new(job("42"));

        let first = state.begin_request(&config).unwrap();
        let second = state.begin_request(&config).unwrap();
        assert_eq!(first.url, "/importer-api/data/42/import-status");
        assert_eq!(second.url, first.url);
        assert!(second.seq > first.seq);
    }

    #[test]
    fn test_successful_response_replaces_snapshot() {
        let config = WidgetConfig::default();
        let mut state = PollerState::new(job("42"));

        let t1 = state.begin_request(&config).unwrap();
        let s1 = snapshot(json!({"a.gpkg": {"l1": "working", "l2": "working"}}));
        assert_eq!(state.apply_response(t1.seq, s1), ResponseOutcome::Accepted);

        let t2 = state.begin_request(&config).unwrap();
        let s2 = snapshot(json!({"b.gpkg": {"l1": "success"}}));
        assert_eq!(state.apply_response(t2.seq, s2.clone()), ResponseOutcome::Accepted);

        // Wholesale replacement, no merge with the previous snapshot
        assert_eq!(state.snapshot(), Some(&s2));
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let config = WidgetConfig::default();
        let mut state = PollerState::new(job("42"));

        let t1 = state.begin_request(&config).unwrap();
        let s1 = snapshot(json!({"a.gpkg": {"layer1": "success"}}));
        state.apply_response(t1.seq, s1.clone());

        let t2 = state.begin_request(&config).unwrap();
        assert_eq!(
            state.record_failure(t2.seq, PollError::Status(500)),
            ResponseOutcome::Accepted
        );

        assert_eq!(state.snapshot(), Some(&s1));
        assert_eq!(state.consecutive_failures(), 1);
        assert_eq!(state.last_error(), Some(&PollError::Status(500)));
        assert!(state.should_continue(&WidgetConfig {
            stop_when_finished: false,
            ..config
        }));
    }

    #[test]
    fn test_failures_keep_polling() {
        let config = WidgetConfig::default();
        let mut state = PollerState::new(job("7"));

        for _ in 0..3 {
            let t = state.begin_request(&config).unwrap();
            state.record_failure(t.seq, PollError::Network("offline".to_string()));
        }
        assert_eq!(state.consecutive_failures(), 3);
        assert!(state.snapshot().is_none());
        assert!(state.should_continue(&config));

        let t = state.begin_request(&config).unwrap();
        state.apply_response(t.seq, snapshot(json!({"a": {"l": "working"}})));
        assert_eq!(state.consecutive_failures(), 0);
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn test_out_of_order_response_is_discarded() {
        let config = WidgetConfig::default();
        let mut state = PollerState::new(job("42"));

        let early = state.begin_request(&config).unwrap();
        let late = state.begin_request(&config).unwrap();

        let newer = snapshot(json!({"a.gpkg": {"layer1": "success"}}));
        let older = snapshot(json!({"a.gpkg": {"layer1": "working"}}));

        // The second-issued request answers first
        assert_eq!(state.apply_response(late.seq, newer.clone()), ResponseOutcome::Accepted);
        assert_eq!(state.apply_response(early.seq, older), ResponseOutcome::Stale);

        assert_eq!(state.snapshot(), Some(&newer));
    }

    #[test]
    fn test_stale_failure_is_not_counted() {
        let config = WidgetConfig::default();
        let mut state = PollerState::new(job("42"));

        let early = state.begin_request(&config).unwrap();
        let late = state.begin_request(&config).unwrap();
        state.apply_response(late.seq, snapshot(json!({})));

        assert_eq!(
            state.record_failure(early.seq, PollError::Status(502)),
            ResponseOutcome::Stale
        );
        assert_eq!(state.consecutive_failures(), 0);
    }

    #[test]
    fn test_disposed_state_ignores_everything() {
        let config = WidgetConfig::default();
        let mut state = PollerState::new(job("42"));
        let in_flight = state.begin_request(&config).unwrap();

        state.dispose();
        state.dispose();

        assert!(state.is_disposed());
        assert!(!state.is_active());
        assert_eq!(state.begin_request(&config), None);
        assert_eq!(
            state.apply_response(in_flight.seq, snapshot(json!({"a": {"l": "success"}}))),
            ResponseOutcome::Disposed
        );
        assert_eq!(
            state.record_failure(in_flight.seq, PollError::Status(500)),
            ResponseOutcome::Disposed
        );
        assert!(state.snapshot().is_none());
        assert!(!state.should_continue(&config));
    }

    #[test]
    fn test_stops_when_finished() {
        let config = WidgetConfig::default();
        let mut state = PollerState::new(job("42"));

        let t = state.begin_request(&config).unwrap();
        state.apply_response(t.seq, snapshot(json!({"a": {"l1": "working", "l2": "success"}})));
        assert!(state.should_continue(&config));

        let t = state.begin_request(&config).unwrap();
        state.apply_response(t.seq, snapshot(json!({"a": {"l1": "error", "l2": "success"}})));
        assert!(state.is_finished());
        assert!(!state.should_continue(&config));
    }

    #[test]
    fn test_keeps_polling_when_finished_if_configured() {
        let config = WidgetConfig {
            stop_when_finished: false,
            ..WidgetConfig::default()
        };
        let mut state = PollerState::new(job("42"));
        let t = state.begin_request(&config).unwrap();
        state.apply_response(t.seq, snapshot(json!({"a": {"l": "success"}})));
        assert!(state.is_finished());
        assert!(state.should_continue(&config));
    }
}
