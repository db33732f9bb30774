use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::MeasurementRecord;
use crate::core::config::DashboardConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no aquarium selected")]
    MissingAquarium,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered HTTP {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response body is not a list")]
    NotAList,
}

pub fn measurements_url(config: &DashboardConfig, aquarium_id: i64) -> String {
    let path = config
        .measurements_path
        .replace("{id}", &aquarium_id.to_string());
    format!("{}{}", config.resolved_base(), path)
}

/// Fetch the raw records for one aquarium, bypassing HTTP caches.
pub async fn fetch_measurements(
    client: &reqwest::Client,
    config: &DashboardConfig,
    aquarium_id: Option<i64>,
) -> Result<Vec<MeasurementRecord>, LoadError> {
    let id = aquarium_id.ok_or(LoadError::MissingAquarium)?;
    let url = measurements_url(config, id);
    debug!(%url, "fetching measurements");

    let response = client
        .get(&url)
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;

    decode_body(status, &body)
}

/// Interpret a finished response. Non-2xx, unparseable JSON and non-array
/// bodies are errors; array elements that are not records are skipped.
pub fn decode_body(status: u16, body: &[u8]) -> Result<Vec<MeasurementRecord>, LoadError> {
    if !(200..300).contains(&status) {
        return Err(LoadError::Status(status));
    }

    let Value::Array(items) = serde_json::from_slice::<Value>(body)? else {
        return Err(LoadError::NotAList);
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(idx, %err, "skipping malformed measurement entry");
                None
            }
        })
        .collect())
}

/// Load records for the dashboard. Any failure degrades to an empty list,
/// which the chart panel renders as its "no data" notice.
pub async fn load_measurements(
    client: &reqwest::Client,
    config: &DashboardConfig,
    aquarium_id: Option<i64>,
) -> Vec<MeasurementRecord> {
    match fetch_measurements(client, config, aquarium_id).await {
        Ok(records) => {
            info!(aquarium_id = ?aquarium_id, count = records.len(), "measurements loaded");
            records
        }
        Err(LoadError::MissingAquarium) => {
            debug!("no aquarium selected; skipping measurement fetch");
            Vec::new()
        }
        Err(err) => {
            warn!(aquarium_id = ?aquarium_id, %err, "measurement fetch failed");
            Vec::new()
        }
    }
}
