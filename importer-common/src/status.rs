//! Per-layer import status

use serde::{Deserialize, Deserializer};

/// Import status of a single layer, as reported by the server.
///
/// The server sends one of `"working"`, `"success"` or `"error"`. Anything
/// else is kept verbatim in [`LayerStatus::Unrecognized`] rather than failing
/// the whole snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerStatus {
    Working,
    Success,
    Error,
    Unrecognized(String),
}

/// Which icon a layer row shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusIcon {
    Spinner,
    Green,
    Red,
    Unknown,
}

impl LayerStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "working" => LayerStatus::Working,
            "success" => LayerStatus::Success,
            "error" => LayerStatus::Error,
            other => LayerStatus::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LayerStatus::Working => "working",
            LayerStatus::Success => "success",
            LayerStatus::Error => "error",
            LayerStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn icon(&self) -> StatusIcon {
        match self {
            LayerStatus::Working => StatusIcon::Spinner,
            LayerStatus::Success => StatusIcon::Green,
            LayerStatus::Error => StatusIcon::Red,
            LayerStatus::Unrecognized(_) => StatusIcon::Unknown,
        }
    }

    /// Success and error are final; the server will not change them again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LayerStatus::Success | LayerStatus::Error)
    }
}

impl<'de> Deserialize<'de> for LayerStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LayerStatus::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_lookup() {
        assert_eq!(LayerStatus::parse("working").icon(), StatusIcon::Spinner);
        assert_eq!(LayerStatus::parse("success").icon(), StatusIcon::Green);
        assert_eq!(LayerStatus::parse("error").icon(), StatusIcon::Red);
    }

    #[test]
    fn test_unrecognized_keeps_raw_value() {
        let status = LayerStatus::parse("queued");
        assert_eq!(status, LayerStatus::Unrecognized("queued".to_string()));
        assert_eq!(status.as_str(), "queued");
        assert_eq!(status.icon(), StatusIcon::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_status_strings_are_case_sensitive() {
        assert_eq!(
            LayerStatus::parse("Success"),
            LayerStatus::Unrecognized("Success".to_string())
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(LayerStatus::Success.is_terminal());
        assert!(LayerStatus::Error.is_terminal());
        assert!(!LayerStatus::Working.is_terminal());
    }

    #[test]
    fn test_deserialize_from_json_string() {
        let status: LayerStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(status, LayerStatus::Error);

        let status: LayerStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, LayerStatus::Unrecognized("paused".to_string()));
    }

    #[test]
    fn test_non_string_is_rejected() {
        assert!(serde_json::from_str::<LayerStatus>("3").is_err());
        assert!(serde_json::from_str::<LayerStatus>("null").is_err());
    }
}
