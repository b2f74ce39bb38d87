//! Widget configuration
//!
//! The hosting page can override any field by putting a JSON object in the
//! `data-config` attribute of the mount element. Everything defaults to the
//! values the importer server expects.

use crate::status::StatusIcon;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Placeholder in the status URL template replaced by the job id
pub const JOB_ID_TOKEN: &str = "<id>";

pub const DEFAULT_STATUS_URL_TEMPLATE: &str = "/importer-api/data/<id>/import-status";
pub const DEFAULT_QUERY_PARAM: &str = "uploadDataId";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;
/// Browsers fire `setTimeout` immediately for delays above `i32::MAX`
pub const MAX_POLL_INTERVAL_MS: u64 = i32::MAX as u64;

const ICON_BASE: &str = "/static/osgeo_importer/img/one_shot_demo";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

fn default_status_url_template() -> String {
    DEFAULT_STATUS_URL_TEMPLATE.to_string()
}

fn default_query_param() -> String {
    DEFAULT_QUERY_PARAM.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_true() -> bool {
    true
}

/// Image paths for the status icons
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IconPaths {
    pub working: String,
    pub success: String,
    pub error: String,
}

impl Default for IconPaths {
    fn default() -> Self {
        Self {
            working: format!("{ICON_BASE}/orange-spinner.gif"),
            success: format!("{ICON_BASE}/green-light.png"),
            error: format!("{ICON_BASE}/red-light.png"),
        }
    }
}

impl IconPaths {
    /// Image for an icon. `Unknown` has no image and is drawn as a glyph.
    pub fn src_for(&self, icon: StatusIcon) -> Option<&str> {
        match icon {
            StatusIcon::Spinner => Some(&self.working),
            StatusIcon::Green => Some(&self.success),
            StatusIcon::Red => Some(&self.error),
            StatusIcon::Unknown => None,
        }
    }
}

/// Widget configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WidgetConfig {
    /// Status endpoint path; `<id>` is replaced by the job id
    #[serde(default = "default_status_url_template")]
    pub status_url_template: String,
    /// Query parameter of the hosting page holding the job id
    #[serde(default = "default_query_param")]
    pub query_param: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Stop polling once every layer is done
    #[serde(default = "default_true")]
    pub stop_when_finished: bool,
    #[serde(default)]
    pub icons: IconPaths,
    /// Absolute URL relative status paths are resolved against. Defaults to
    /// the hosting page's URL.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            status_url_template: default_status_url_template(),
            query_param: default_query_param(),
            poll_interval_ms: default_poll_interval_ms(),
            stop_when_finished: true,
            icons: IconPaths::default(),
            base_url: None,
        }
    }
}

impl WidgetConfig {
    /// Parse and validate a JSON override. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WidgetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ConfigError::Config(format!(
                "poll_interval_ms must be between 1 and {MAX_POLL_INTERVAL_MS}"
            )));
        }
        if !self.status_url_template.contains(JOB_ID_TOKEN) {
            return Err(ConfigError::Config(format!(
                "status_url_template must contain {JOB_ID_TOKEN}"
            )));
        }
        if self.query_param.is_empty() {
            return Err(ConfigError::Config("query_param must not be empty".to_string()));
        }
        if let Some(base) = &self.base_url {
            Url::parse(base)
                .map_err(|e| ConfigError::Config(format!("invalid base_url {base}: {e}")))?;
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Use `base` for resolving status paths unless one is configured.
    pub fn with_default_base_url(mut self, base: Option<String>) -> Self {
        if self.base_url.is_none() {
            self.base_url = base;
        }
        self
    }

    /// Status endpoint for a job. The id is percent-encoded so it stays one
    /// path segment. With a base URL the result is absolute; an absolute
    /// template ignores the base.
    pub fn status_url(&self, job_id: &str) -> String {
        let path = self
            .status_url_template
            .replace(JOB_ID_TOKEN, &urlencoding::encode(job_id));

        let Some(base) = &self.base_url else {
            return path;
        };
        match Url::parse(base).and_then(|base| base.join(&path)) {
            Ok(url) => url.to_string(),
            Err(_) => path,
        }
    }
}
