//! Hosting page helpers: query string and mount element config

use crate::MOUNT_ELEMENT_ID;
use importer_common::{JobId, WidgetConfig};
use tracing::{info, warn};

const CONFIG_ATTRIBUTE: &str = "data-config";

fn query_string() -> Option<String> {
    let window = web_sys_x::window()?;
    window.location().search().ok()
}

fn page_url() -> Option<String> {
    let window = web_sys_x::window()?;
    window.location().href().ok()
}

/// Job id from the page URL, read once at mount
pub fn read_job_id(param: &str) -> Option<JobId> {
    let job_id = query_string().and_then(|query| JobId::from_query(&query, param));
    match &job_id {
        Some(id) => info!("Tracking import job {id}"),
        None => info!("No {param} in page URL, nothing to track"),
    }
    job_id
}

fn config_attribute() -> Option<String> {
    let document = web_sys_x::window()?.document()?;
    document
        .get_element_by_id(MOUNT_ELEMENT_ID)?
        .get_attribute(CONFIG_ATTRIBUTE)
}

/// Widget config from the mount element's `data-config` attribute, falling
/// back to defaults when it is missing or invalid. Status paths resolve
/// against the page URL unless the config names a base.
pub fn load_config() -> WidgetConfig {
    let config = match config_attribute() {
        None => WidgetConfig::default(),
        Some(json) => WidgetConfig::from_json(&json).unwrap_or_else(|e| {
            warn!("Ignoring invalid {CONFIG_ATTRIBUTE} on #{MOUNT_ELEMENT_ID}: {e}");
            WidgetConfig::default()
        }),
    };
    config.with_default_base_url(page_url())
}
