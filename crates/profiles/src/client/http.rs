//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::Client;

use super::{ProfileTransport, TransportResponse};
use crate::errors::ProfilesError;

/// Default base URL of the public profile API.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport talking to the upstream API with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self::with_client(base_url, client)
    }

    /// Create a transport reusing an existing reqwest client.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl ProfileTransport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<TransportResponse, ProfilesError> {
        let url = format!("{}{}", self.base_url, path);

        debug!("GET {} with {} params", url, query.len());

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProfilesError::Timeout
                } else {
                    ProfilesError::Transport(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProfilesError::Timeout
            } else {
                ProfilesError::Transport(format!("Failed to read body: {}", e))
            }
        })?;

        Ok(TransportResponse { status, body })
    }
}
