//! Import status view component
//!
//! Renders the file → layer → icon tree for the current status view.

use super::{ProgressSummaryLine, StatusIconView};
use dioxus::prelude::*;
use importer_common::{FileBlock, IconPaths, StatusView};

/// Import status tree, or a placeholder when there is no job to show
#[component]
pub fn ImportStatusView(view: StatusView, icons: IconPaths) -> Element {
    match view {
        StatusView::Placeholder => rsx! {
            div { class: "import-status-empty", "empty" }
        },
        StatusView::Waiting => rsx! {
            div { class: "import-status-waiting", "Waiting for import status..." }
        },
        StatusView::Files { summary, files } => rsx! {
            div { class: "import-status",
                if summary.total > 0 {
                    ProgressSummaryLine { summary }
                }
                for file in files.iter() {
                    FileBlockView {
                        key: "{file.filename}",
                        file: file.clone(),
                        icons: icons.clone(),
                    }
                }
            }
        },
    }
}

#[component]
fn FileBlockView(file: FileBlock, icons: IconPaths) -> Element {
    rsx! {
        div { style: "margin-top: 0.5em;",
            "{file.filename}:"
            for layer in file.layers.iter() {
                div { key: "{layer.name}",
                    div { style: "display: inline-block; width: 15em;",
                        StatusIconView {
                            icon: layer.icon,
                            status: layer.status.as_str().to_string(),
                            icons: icons.clone(),
                        }
                        "{layer.name}:"
                    }
                }
            }
        }
    }
}
