//! Transport trait definitions.

use async_trait::async_trait;

use crate::errors::ProfilesError;

/// Status line and body of one upstream response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` carrying the given JSON body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// Trait for issuing GET requests against the upstream profile API.
///
/// Any HTTP status is a successful transport call; only failures where no
/// response arrived are returned as errors (`Timeout`, `Transport`).
/// Status classification happens in the client, so a transport never retries.
#[async_trait]
pub trait ProfileTransport: Send + Sync {
    /// Issue one GET for `path` (relative to the transport's base URL).
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<TransportResponse, ProfilesError>;
}
