use dioxus::prelude::*;
use importer_common::ProgressSummary;

/// One-line layer count above the file list
#[component]
pub fn ProgressSummaryLine(summary: ProgressSummary) -> Element {
    let text = if summary.is_finished() {
        format!(
            "Import finished: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        )
    } else {
        format!(
            "{} layers: {} working, {} succeeded, {} failed",
            summary.total, summary.working, summary.succeeded, summary.failed
        )
    };

    rsx! {
        div { style: "margin-bottom: 0.5em; color: #555;", "{text}" }
    }
}
