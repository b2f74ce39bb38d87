//! Status icon for a layer row

use dioxus::prelude::*;
use importer_common::{IconPaths, StatusIcon};

const ICON_STYLE: &str = "width: 1em; margin: 0 0.5em 0 0.5em; vertical-align: middle;";

/// Spinner, green or red light; an unrecognized status gets a `?` badge
/// with the raw status as its tooltip.
#[component]
pub fn StatusIconView(icon: StatusIcon, status: String, icons: IconPaths) -> Element {
    match icons.src_for(icon) {
        Some(src) => rsx! {
            img { style: ICON_STYLE, src: "{src}", alt: "{status}", title: "{status}" }
        },
        None => rsx! {
            span {
                style: "{ICON_STYLE} display: inline-block; text-align: center; font-weight: bold; color: #888;",
                title: "Unknown status: {status}",
                "?"
            }
        },
    }
}
