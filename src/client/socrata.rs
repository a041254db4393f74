//! Socrata open-data client for the Calgary building permits dataset

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};

use super::{PermitRecord, PermitSource, RawPermit};
use crate::config::Config;
use crate::error::{Error, Result, UpstreamError};

/// Ordering requested from the dataset: newest applications first
const ORDER_BY: &str = "applieddate DESC";

/// HTTP client for the SODA permit endpoint
pub struct SocrataClient {
    http: HttpClient,
    base_url: String,
    fetch_limit: usize,
    probe_timeout: Duration,
}

impl SocrataClient {
    /// Create a client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("permitleads/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            fetch_limit: config.fetch_limit,
            probe_timeout: config.probe_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Map a raw response body to normalized records, dropping unplaceable rows
    fn normalize(rows: Vec<RawPermit>) -> Vec<PermitRecord> {
        let received = rows.len();
        let records: Vec<PermitRecord> = rows.into_iter().filter_map(PermitRecord::from_raw).collect();

        let dropped = received - records.len();
        if dropped > 0 {
            log::debug!("Dropped {} of {} rows without coordinates", dropped, received);
        }
        records
    }
}

#[async_trait]
impl PermitSource for SocrataClient {
    async fn fetch_permits(&self) -> std::result::Result<Vec<PermitRecord>, UpstreamError> {
        let limit = self.fetch_limit.to_string();
        log::debug!("GET {} ($limit={})", self.base_url, limit);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("$limit", limit.as_str()), ("$order", ORDER_BY)])
            .send()
            .await
            .map_err(UpstreamError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let rows = response.json::<Vec<RawPermit>>().await.map_err(|e| {
                    UpstreamError::Other(format!("malformed response: {}", e))
                })?;
                let records = Self::normalize(rows);
                log::info!("Fetched {} permits from {}", records.len(), self.base_url);
                Ok(records)
            }
            status if status.is_server_error() => {
                Err(UpstreamError::Http(format!("server error {}", status)))
            }
            _ => Err(UpstreamError::Http(format!("unexpected status {}", status))),
        }
    }

    async fn probe(&self) -> bool {
        let result = self
            .http
            .get(&self.base_url)
            .query(&[("$limit", "1")])
            .timeout(self.probe_timeout)
            .send()
            .await;

        match result {
            Ok(response) => {
                let up = response.status() == StatusCode::OK;
                log::debug!("Probe {} -> {}", self.base_url, response.status());
                up
            }
            Err(e) => {
                log::debug!("Probe {} failed: {}", self.base_url, e);
                false
            }
        }
    }
}
