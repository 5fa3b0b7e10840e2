//! ProfileDeck Profiles Crate
//!
//! This crate fetches paginated user profiles from a public JSON API,
//! validates every record and hands consumers validated pages plus a
//! pagination cursor.
//!
//! # Overview
//!
//! The profiles crate supports:
//! - Paginated listing and single-profile lookup over HTTP
//! - Transparent bounded retry of transient (5xx / transport) failures
//! - Fail-fast schema validation with per-field reasons
//! - A query cache context and page accumulation for consumers
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  ProfilePager /  | --> |   QueryCache     |  (explicit cache context)
//! |  ProfileLookup   |     +------------------+
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   ProfileFeed    |  (page assembler: validate, filter, cursor)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |  ProfileClient   | --> |   RetryConfig    |  (fixed delay, bounded)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! | ProfileTransport |  (reqwest, or a test double)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Profile`] - A validated record
//! - [`PageRequest`] - Page number and size, checked at construction
//! - [`ProfilePage`] - Validated records and the next cursor
//! - [`FetchError`] - Generic failure surfaced after retrying
//! - [`ValidationError`] - First constraint a record violated

pub mod client;
pub mod errors;
pub mod feed;
pub mod models;
pub mod query;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export all public types from models
pub use models::{
    Address, Company, FetchOutcome, PageOutcome, PageRequest, Profile, ProfileId, ProfilePage,
    RawPage, MAX_PAGE_SIZE,
};

pub use client::{
    HttpTransport, ProfileClient, ProfileTransport, RawRecord, RetryConfig, TransportResponse,
};
pub use errors::{FetchError, LookupError, ProfilesError, RetryClass};
pub use feed::ProfileFeed;
pub use query::{
    CacheConfig, CacheHit, CachedValue, CancelHandle, ProfileLookup, ProfilePager, QueryCache,
    QueryKey, RequestState,
};
pub use schema::{validate, validate_all, ValidationError, ValidationResult};
