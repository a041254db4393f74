//! JSON output formatting

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Envelope for JSON output
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When this output was produced
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// When the permit snapshot behind the data was fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_updated: Option<String>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T, cache_updated: Option<DateTime<Utc>>) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                cache_updated: cache_updated.map(|dt| dt.to_rfc3339()),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the envelope
pub fn format_json<T: Serialize + ?Sized>(
    data: &T,
    cache_updated: Option<DateTime<Utc>>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data, cache_updated))
}
