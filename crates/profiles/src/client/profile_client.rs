use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde_json::Value;

use super::retry::{with_retry, Exhausted, RetryConfig};
use super::{HttpTransport, ProfileTransport, TransportResponse};
use crate::errors::{FetchError, ProfilesError, FETCH_PROFILES_FAILED, FETCH_PROFILE_FAILED};
use crate::models::{FetchOutcome, PageRequest, ProfileId, RawPage};

/// Listing endpoint, relative to the base URL.
const USERS_PATH: &str = "/users";

/// Container key the listing endpoint wraps its records in.
const RECORDS_KEY: &str = "users";

/// One unvalidated record fetched by id.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    pub record: Value,
    pub attempts: u32,
}

/// Client for the upstream profile API.
///
/// Every call owns its own retry state; the client itself holds no mutable
/// state and can be shared between concurrent page requests.
#[derive(Clone)]
pub struct ProfileClient {
    transport: Arc<dyn ProfileTransport>,
    retry: RetryConfig,
}

impl ProfileClient {
    /// Create a client over any transport with the default retry policy.
    pub fn new(transport: Arc<dyn ProfileTransport>) -> Self {
        Self {
            transport,
            retry: RetryConfig::default(),
        }
    }

    /// Create a client over HTTP.
    pub fn http(base_url: &str, timeout: Duration) -> Self {
        Self::new(Arc::new(HttpTransport::new(base_url, timeout)))
    }

    /// Replace the retry policy used by [`fetch_page`](Self::fetch_page)
    /// and [`fetch_by_id`](Self::fetch_by_id).
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Fetch one page of raw records with the client's retry policy.
    pub async fn fetch_page(&self, request: &PageRequest) -> FetchOutcome {
        self.fetch_page_with(request, &self.retry).await
    }

    /// Fetch one page of raw records with an explicit retry policy.
    ///
    /// Issues `GET /users?limit={page_size}&skip={offset}`. 5xx responses and
    /// transport failures are retried; anything else fails immediately. The
    /// returned page is identical whether or not retries happened, apart from
    /// [`RawPage::attempts`].
    pub async fn fetch_page_with(
        &self,
        request: &PageRequest,
        retry: &RetryConfig,
    ) -> FetchOutcome {
        let query = [
            ("limit", request.page_size().to_string()),
            ("skip", request.offset().to_string()),
        ];
        let query = &query;
        let transport = &self.transport;

        debug!(
            "Fetching profiles page {} (limit={}, skip={})",
            request.page_number(),
            request.page_size(),
            request.offset()
        );

        let result = with_retry(retry, "profiles request", || async move {
            let response = transport.get(USERS_PATH, query).await?;
            extract_records(response)
        })
        .await;

        match result {
            Ok((records, attempts)) => Ok(RawPage::new(records, request, attempts)),
            Err(exhausted) => Err(give_up(FETCH_PROFILES_FAILED, exhausted)),
        }
    }

    /// Fetch a single raw record by id (`GET /users/{id}`).
    pub async fn fetch_by_id(&self, id: &ProfileId) -> Result<RawRecord, FetchError> {
        let path = format!("{}/{}", USERS_PATH, urlencoding::encode(id.as_str()));
        let path = path.as_str();
        let transport = &self.transport;

        debug!("Fetching profile {}", id);

        let result = with_retry(&self.retry, "profile request", || async move {
            let response = transport.get(path, &[]).await?;
            extract_record(response)
        })
        .await;

        match result {
            Ok((record, attempts)) => Ok(RawRecord { record, attempts }),
            Err(exhausted) => Err(give_up(FETCH_PROFILE_FAILED, exhausted)),
        }
    }
}

/// Log the classified cause and reduce it to the generic failure.
fn give_up(message: &'static str, exhausted: Exhausted) -> FetchError {
    warn!(
        "{}: {} after {} attempt(s)",
        message, exhausted.error, exhausted.attempts
    );
    FetchError::new(message, exhausted.attempts, exhausted.error)
}

fn parse_ok_body(response: TransportResponse) -> Result<Value, ProfilesError> {
    if response.status != 200 {
        return Err(ProfilesError::Status {
            status: response.status,
        });
    }
    if response.body.trim().is_empty() {
        return Err(ProfilesError::MalformedResponse("empty body".to_string()));
    }

    serde_json::from_str(&response.body)
        .map_err(|e| ProfilesError::MalformedResponse(format!("invalid JSON: {}", e)))
}

/// Pull the record list out of a listing response.
///
/// Accepts `{ "users": [...] }` or a bare array.
fn extract_records(response: TransportResponse) -> Result<Vec<Value>, ProfilesError> {
    match parse_ok_body(response)? {
        Value::Array(records) => Ok(records),
        Value::Object(mut container) => match container.remove(RECORDS_KEY) {
            Some(Value::Array(records)) => Ok(records),
            Some(_) => Err(ProfilesError::MalformedResponse(format!(
                "`{}` is not an array",
                RECORDS_KEY
            ))),
            None => Err(ProfilesError::MalformedResponse(format!(
                "missing `{}` container",
                RECORDS_KEY
            ))),
        },
        _ => Err(ProfilesError::MalformedResponse(
            "expected an array or object".to_string(),
        )),
    }
}

fn extract_record(response: TransportResponse) -> Result<Value, ProfilesError> {
    parse_ok_body(response)
}
