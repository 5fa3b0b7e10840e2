//! Error types and retry classification for the profiles crate.
//!
//! This module provides:
//! - [`ProfilesError`]: classified failure of a single request attempt
//! - [`RetryClass`]: whether a failure is worth retrying
//! - [`FetchError`]: the generic failure handed to callers once retrying is over
//! - [`LookupError`]: failure of a single-profile lookup

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

use crate::schema::ValidationError;

/// Message surfaced when a page of profiles could not be fetched.
pub const FETCH_PROFILES_FAILED: &str = "Failed to fetch profiles";

/// Message surfaced when a single profile could not be fetched.
pub const FETCH_PROFILE_FAILED: &str = "Failed to fetch profile";

/// Errors produced while issuing a request to the upstream API.
///
/// Each variant is classified into a [`RetryClass`] via
/// [`retry_class`](Self::retry_class), which drives the retry loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfilesError {
    /// A caller passed arguments that can never produce a valid request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The upstream API answered with a non-200 status.
    #[error("Unexpected status: {status}")]
    Status {
        /// HTTP status code returned by the upstream API
        status: u16,
    },

    /// The request did not complete within the transport timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request failed before any response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream API answered 200 but the body was not usable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ProfilesError {
    /// Returns the retry classification for this error.
    ///
    /// ```
    /// use profiledeck_profiles::errors::{ProfilesError, RetryClass};
    ///
    /// assert_eq!(ProfilesError::Status { status: 503 }.retry_class(), RetryClass::Transient);
    /// assert_eq!(ProfilesError::Status { status: 404 }.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Status { status } if (500..600).contains(status) => RetryClass::Transient,

            // A lost connection or timeout is handled as if the server had answered 5xx
            Self::Timeout | Self::Transport(_) => RetryClass::Transient,

            Self::Status { .. } | Self::MalformedResponse(_) | Self::InvalidArgument(_) => {
                RetryClass::Never
            }
        }
    }
}

/// Terminal fetch failure.
///
/// Displays only the generic message; the classified cause and the number
/// of attempts are available for logging through [`cause`](Self::cause)
/// and [`attempts`](Self::attempts) but are never part of the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    message: &'static str,
    attempts: u32,
    #[source]
    cause: ProfilesError,
}

impl FetchError {
    pub(crate) fn new(message: &'static str, attempts: u32, cause: ProfilesError) -> Self {
        Self {
            message,
            attempts,
            cause,
        }
    }

    /// The generic, caller-facing message.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Total number of requests issued before giving up.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The classified failure of the last attempt.
    pub fn cause(&self) -> &ProfilesError {
        &self.cause
    }
}

/// Failure of a single-profile lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The upstream record was fetched but does not satisfy the profile shape.
    #[error("Invalid profile: {0}")]
    Invalid(#[from] ValidationError),
}
