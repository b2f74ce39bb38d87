use thiserror::Error;

/// Why a single status poll produced no update
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("invalid status body: {0}")]
    Parse(String),
}
