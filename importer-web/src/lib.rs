pub mod api;
pub mod page;
pub mod poll;

use dioxus::prelude::*;
use importer_common::render_model;
use importer_ui::ImportStatusView;

/// Element of the hosting page the widget mounts into
pub const MOUNT_ELEMENT_ID: &str = "import-status";

#[component]
pub fn App() -> Element {
    let config = use_hook(page::load_config);
    let job_id = use_hook({
        let param = config.query_param.clone();
        move || page::read_job_id(&param)
    });
    let state = poll::use_status_poller(config.clone(), job_id);

    // Only re-render when what is shown changes, not on every ticket issued
    let view = use_memo(move || render_model(&state.read()));

    rsx! {
        ImportStatusView { view: view(), icons: config.icons.clone() }
    }
}
