//! Cached single-profile lookups.

use std::sync::Arc;

use log::debug;

use super::cache::{CachedValue, QueryCache, QueryKey};
use crate::errors::LookupError;
use crate::feed::ProfileFeed;
use crate::models::{Profile, ProfileId};

/// Looks up profiles by id through the shared cache.
#[derive(Clone)]
pub struct ProfileLookup {
    feed: ProfileFeed,
    cache: Arc<QueryCache>,
}

impl ProfileLookup {
    pub fn new(feed: ProfileFeed, cache: Arc<QueryCache>) -> Self {
        Self { feed, cache }
    }

    /// Return the profile from cache if fresh, otherwise fetch and cache it.
    ///
    /// Failures are never cached.
    pub async fn get(&self, id: &ProfileId) -> Result<Profile, LookupError> {
        let key = QueryKey::profile(id);

        if let Some(CachedValue::Profile(profile)) = self.cache.get_fresh(&key) {
            debug!("Serving profile {} from cache", id);
            return Ok(profile);
        }

        let profile = self.feed.get_profile(id).await?;
        self.cache.put(key, CachedValue::Profile(profile.clone()));
        Ok(profile)
    }

    /// Drop the cached copy so the next [`get`](Self::get) refetches.
    pub fn invalidate(&self, id: &ProfileId) -> bool {
        self.cache.invalidate(&QueryKey::profile(id))
    }
}
