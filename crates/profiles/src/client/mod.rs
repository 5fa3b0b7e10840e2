//! Upstream API access with bounded retry.
//!
//! This module contains:
//! - The `ProfileTransport` trait, the seam between the client and the wire
//! - `HttpTransport`, the reqwest implementation
//! - `RetryConfig` and the retry loop shared by every request
//! - `ProfileClient`, which issues listing and lookup requests
//!
//! # Failure handling
//!
//! | Upstream answer | Retried? | Caller sees |
//! |-----------------|----------|-------------|
//! | 200 + record list | - | records |
//! | 5xx, timeout, connection failure | up to `max_retries` times | records, or the generic failure |
//! | 4xx, other status, malformed body | no | the generic failure |

mod http;
mod profile_client;
mod retry;
mod transport;

pub use http::{HttpTransport, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use profile_client::{ProfileClient, RawRecord};
pub use retry::{RetryConfig, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};
pub use transport::{ProfileTransport, TransportResponse};
