use serde::Serialize;
use serde_json::Value;

use super::Profile;
use crate::errors::{FetchError, ProfilesError};

/// Largest page the upstream API is asked for in one request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated request for one page of profiles.
///
/// Construction through [`PageRequest::new`] is the only way to obtain one,
/// so every request reaching the fetch layer has a usable size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, ProfilesError> {
        if page_size == 0 {
            return Err(ProfilesError::InvalidArgument(
                "page size must be greater than zero".to_string(),
            ));
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(ProfilesError::InvalidArgument(format!(
                "page size {} exceeds the maximum of {}",
                page_size, MAX_PAGE_SIZE
            )));
        }

        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// First page of the given size.
    pub fn first(page_size: u32) -> Result<Self, ProfilesError> {
        Self::new(0, page_size)
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of records to skip upstream.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number) * u64::from(self.page_size)
    }
}

/// Unvalidated records returned by one successful fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPage {
    pub records: Vec<Value>,
    /// Offset of the following page, `None` once the upstream ran short.
    pub next_offset: Option<u64>,
    /// Requests issued to obtain this page (1 when no retry was needed).
    pub attempts: u32,
}

impl RawPage {
    pub(crate) fn new(records: Vec<Value>, request: &PageRequest, attempts: u32) -> Self {
        let next_offset = if records.len() < request.page_size() as usize {
            None
        } else {
            Some(request.offset() + records.len() as u64)
        };

        Self {
            records,
            next_offset,
            attempts,
        }
    }
}

/// One page of validated profiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePage {
    pub records: Vec<Profile>,
    /// Page number to request next, `None` when pagination is over.
    pub next_cursor: Option<u32>,
    /// Records received from upstream that failed validation.
    #[serde(skip)]
    pub dropped: usize,
}

/// Result of one fetch: raw records or the generic failure.
pub type FetchOutcome = Result<RawPage, FetchError>;

/// Result of loading one page through the assembler.
pub type PageOutcome = Result<ProfilePage, FetchError>;
