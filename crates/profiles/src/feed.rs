//! Page assembly: fetch, validate, filter, paginate.
//!
//! Retrying belongs to the client; this layer never retries and never fails
//! because of invalid records. Records that fail validation are dropped with
//! a warning and the page is still returned, possibly empty.

use log::{debug, warn};

use crate::client::ProfileClient;
use crate::errors::{LookupError, ProfilesError};
use crate::models::{PageOutcome, PageRequest, Profile, ProfileId, ProfilePage};
use crate::schema::{validate, validate_all};

/// Validated view over the upstream profile API.
#[derive(Clone)]
pub struct ProfileFeed {
    client: ProfileClient,
}

impl ProfileFeed {
    pub fn new(client: ProfileClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ProfileClient {
        &self.client
    }

    /// Load page `page_number` of `page_size` profiles.
    ///
    /// The outer error is a precondition violation (invalid page size) and
    /// is returned before any request is made; the inner outcome carries
    /// fetch failures.
    pub async fn load(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<PageOutcome, ProfilesError> {
        let request = PageRequest::new(page_number, page_size)?;
        Ok(self.load_page(request).await)
    }

    /// Load one page and keep only the records that validate.
    ///
    /// `next_cursor` is `page_number + 1` when the number of *validated*
    /// records equals the page size, `None` otherwise. A full upstream page
    /// with rejected records therefore ends pagination early.
    pub async fn load_page(&self, request: PageRequest) -> PageOutcome {
        let raw = self.client.fetch_page(&request).await?;
        let received = raw.records.len();

        let (records, rejected) = validate_all(&raw.records);
        for error in &rejected {
            warn!(
                "Dropping invalid profile on page {}: {}",
                request.page_number(),
                error
            );
        }

        let next_cursor = if records.len() == request.page_size() as usize {
            request.page_number().checked_add(1)
        } else {
            None
        };

        debug!(
            "Loaded page {}: {} of {} records valid, next cursor {:?}",
            request.page_number(),
            records.len(),
            received,
            next_cursor
        );

        Ok(ProfilePage {
            records,
            next_cursor,
            dropped: rejected.len(),
        })
    }

    /// Fetch and validate a single profile.
    pub async fn get_profile(&self, id: &ProfileId) -> Result<Profile, LookupError> {
        let raw = self.client.fetch_by_id(id).await?;

        validate(&raw.record).map_err(|error| {
            warn!("Profile {} failed validation: {}", id, error);
            LookupError::Invalid(error)
        })
    }
}
