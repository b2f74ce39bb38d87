//! Status snapshot returned by the import status endpoint

use crate::status::LayerStatus;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Layer name to status, ordered by layer name
pub type LayerStatusMap = BTreeMap<String, LayerStatus>;

/// Full progress of one import job: filename to per-layer statuses.
///
/// Backed by ordered maps so files and layers always come out sorted by
/// name, whatever order the server wrote them in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct StatusSnapshot {
    files: BTreeMap<String, LayerStatusMap>,
}

/// Layer counts by status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    /// Files the server listed without any layers yet
    pub files_without_layers: usize,
    pub total: usize,
    pub working: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub unrecognized: usize,
}

impl ProgressSummary {
    /// At least one layer, every file has layers, and every layer has
    /// reached success or error.
    pub fn is_finished(&self) -> bool {
        self.total > 0
            && self.files_without_layers == 0
            && self.succeeded + self.failed == self.total
    }
}

impl StatusSnapshot {
    /// Parse a response body. Anything but a JSON object of objects of
    /// strings is an error.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &LayerStatusMap)> {
        self.files.iter().map(|(name, layers)| (name.as_str(), layers))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn layer_count(&self) -> usize {
        self.files.values().map(|layers| layers.len()).sum()
    }

    pub fn summary(&self) -> ProgressSummary {
        let mut summary = ProgressSummary {
            files_without_layers: self.files.values().filter(|l| l.is_empty()).count(),
            ..Default::default()
        };
        for status in self.files.values().flat_map(|layers| layers.values()) {
            summary.total += 1;
            match status {
                LayerStatus::Working => summary.working += 1,
                LayerStatus::Success => summary.succeeded += 1,
                LayerStatus::Error => summary.failed += 1,
                LayerStatus::Unrecognized(_) => summary.unrecognized += 1,
            }
        }
        summary
    }

    /// Every file has reported layers and every layer is settled. A file
    /// with no layers yet keeps the job open.
    pub fn is_terminal(&self) -> bool {
        !self.files.is_empty()
            && self.files.values().all(|layers| {
                !layers.is_empty() && layers.values().all(LayerStatus::is_terminal)
            })
    }
}
