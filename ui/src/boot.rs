//! Boot payload embedded by the server-rendered page.
//!
//! The page carries a `<script type="application/json" id="reefboard-boot">`
//! element listing the aquariums and the dashboard configuration. A
//! `?aquarium_id=` query parameter overrides the server's selection.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::config::DashboardConfig;

pub const BOOT_ELEMENT_ID: &str = "reefboard-boot";
pub const AQUARIUM_QUERY_PARAM: &str = "aquarium_id";

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("boot element `{0}` not found")]
    Missing(String),

    #[error("invalid boot payload: {0}")]
    Invalid(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AquariumEntry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// ISO date the tank was set up, if recorded.
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    pub aquarium_id: Option<i64>,
    pub aquariums: Vec<AquariumEntry>,
    pub config: DashboardConfig,
}

impl BootConfig {
    pub fn from_json(raw: &str) -> Result<Self, BootError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply the query-string override. Values that are not integers are ignored.
    pub fn with_query_override(mut self, raw: Option<&str>) -> Self {
        if let Some(value) = raw.map(str::trim).filter(|s| !s.is_empty()) {
            match value.parse::<i64>() {
                Ok(id) => self.aquarium_id = Some(id),
                Err(_) => warn!(%value, "ignoring non-numeric aquarium_id parameter"),
            }
        }
        self
    }

    /// Fill in the selection: the first aquarium when nothing was chosen.
    pub fn resolve_selection(mut self) -> Self {
        if self.aquarium_id.is_none() {
            self.aquarium_id = self.aquariums.first().map(|a| a.id);
        }
        self
    }

    pub fn aquarium(&self, id: Option<i64>) -> Option<&AquariumEntry> {
        let id = id?;
        self.aquariums.iter().find(|a| a.id == id)
    }

    pub fn selected(&self) -> Option<&AquariumEntry> {
        self.aquarium(self.aquarium_id)
    }

    /// Read the payload from the hosting document. A missing or malformed
    /// payload yields the defaults (no aquariums, stock configuration).
    pub fn read_from_document() -> Self {
        let parsed = read_boot_text().and_then(|raw| Self::from_json(&raw));
        let boot = match parsed {
            Ok(boot) => boot,
            Err(BootError::Missing(id)) => {
                debug!(%id, "no boot payload on page; using defaults");
                Self::default()
            }
            Err(err) => {
                warn!(%err, "boot payload rejected; using defaults");
                Self::default()
            }
        };
        boot.with_query_override(crate::core::platform::query_param(AQUARIUM_QUERY_PARAM).as_deref())
            .resolve_selection()
    }
}

#[cfg(target_arch = "wasm32")]
fn read_boot_text() -> Result<String, BootError> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(BOOT_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .ok_or_else(|| BootError::Missing(BOOT_ELEMENT_ID.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_boot_text() -> Result<String, BootError> {
    Err(BootError::Missing(BOOT_ELEMENT_ID.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::MetricKey;

    const PAYLOAD: &str = r#"{
        "aquariums": [
            {"id": 3, "name": "Reef 120", "image_url": "/aquarium/3/image"},
            {"id": 7, "name": "Nano"}
        ],
        "config": {"default_metric": "kh", "animation_ms": 0}
    }"#;

    #[test]
    fn parses_partial_payload_with_defaults() {
        let boot = BootConfig::from_json(PAYLOAD).unwrap();
        assert_eq!(boot.aquariums.len(), 2);
        assert_eq!(boot.aquariums[1].image_url, None);
        assert_eq!(boot.config.default_metric, MetricKey::Kh);
        assert_eq!(boot.config.animation_ms, 0);
        assert_eq!(boot.config.axis_format, DashboardConfig::default().axis_format);
    }

    #[test]
    fn first_aquarium_is_selected_by_default() {
        let boot = BootConfig::from_json(PAYLOAD).unwrap().resolve_selection();
        assert_eq!(boot.aquarium_id, Some(3));
        assert_eq!(boot.selected().map(|a| a.name.as_str()), Some("Reef 120"));
    }

    #[test]
    fn query_parameter_overrides_selection() {
        let boot = BootConfig::from_json(PAYLOAD)
            .unwrap()
            .with_query_override(Some("7"))
            .resolve_selection();
        assert_eq!(boot.aquarium_id, Some(7));

        let boot = BootConfig::from_json(PAYLOAD)
            .unwrap()
            .with_query_override(Some("seven"))
            .resolve_selection();
        assert_eq!(boot.aquarium_id, Some(3));
    }

    #[test]
    fn no_aquariums_means_no_selection() {
        let boot = BootConfig::default().resolve_selection();
        assert_eq!(boot.aquarium_id, None);
        assert!(boot.selected().is_none());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(matches!(BootConfig::from_json("{"), Err(BootError::Invalid(_))));
    }

    #[test]
    fn native_read_falls_back_to_defaults() {
        assert_eq!(BootConfig::read_from_document(), BootConfig::default());
    }
}
