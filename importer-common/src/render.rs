//! Render model: what the status view shows for a given poller state

use crate::poller::PollerState;
use crate::snapshot::{ProgressSummary, StatusSnapshot};
use crate::status::{LayerStatus, StatusIcon};

#[derive(Clone, Debug, PartialEq)]
pub enum StatusView {
    /// No job id on the page
    Placeholder,
    /// Polling, but no snapshot has arrived yet
    Waiting,
    Files {
        summary: ProgressSummary,
        files: Vec<FileBlock>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FileBlock {
    pub filename: String,
    pub layers: Vec<LayerRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerRow {
    pub name: String,
    pub status: LayerStatus,
    pub icon: StatusIcon,
}

pub fn render_model(state: &PollerState) -> StatusView {
    if state.job_id().is_none() {
        return StatusView::Placeholder;
    }
    match state.snapshot() {
        None => StatusView::Waiting,
        Some(snapshot) => StatusView::Files {
            summary: snapshot.summary(),
            files: file_blocks(snapshot),
        },
    }
}

fn file_blocks(snapshot: &StatusSnapshot) -> Vec<FileBlock> {
    snapshot
        .files()
        .map(|(filename, layers)| FileBlock {
            filename: filename.to_string(),
            layers: layers
                .iter()
                .map(|(name, status)| LayerRow {
                    name: name.clone(),
                    status: status.clone(),
                    icon: status.icon(),
                })
                .collect(),
        })
        .collect()
}
