use importer_common::{PollError, StatusSnapshot};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

/// Fetch the current status snapshot of an import job.
///
/// Only a 200 with a well-formed body counts as a snapshot.
pub async fn fetch_status(url: &str) -> Result<StatusSnapshot, PollError> {
    let resp = reqwest::Client::new()
        .get(url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
        .map_err(|e| PollError::Network(e.to_string()))?;

    if resp.status() != StatusCode::OK {
        return Err(PollError::Status(resp.status().as_u16()));
    }

    let body = resp
        .bytes()
        .await
        .map_err(|e| PollError::Network(e.to_string()))?;

    StatusSnapshot::from_json(&body).map_err(|e| PollError::Parse(e.to_string()))
}
