//! Page accumulation for list consumers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;

use super::cache::{CachedValue, QueryCache, QueryKey};
use crate::errors::ProfilesError;
use crate::feed::ProfileFeed;
use crate::models::{PageRequest, Profile, ProfilePage};

/// Lifecycle of the most recent page request.
///
/// `Idle -> Loading -> {Success, Error}`; a further request re-enters
/// `Loading` from either terminal state. Retries inside the client stay
/// within `Loading`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Loading,
    Success,
    /// Generic failure message, safe to show to users.
    Error(String),
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error(_))
    }
}

/// Handle that makes in-flight loads discard their result.
///
/// Cancelling does not abort the request; its eventual result is ignored.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    generation: Arc<AtomicU64>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Accumulates validated profiles page by page.
///
/// One pager serves one list view; several pagers may share a feed and a
/// cache and load concurrently.
pub struct ProfilePager {
    feed: ProfileFeed,
    cache: Arc<QueryCache>,
    page_size: u32,
    profiles: Vec<Profile>,
    next_page: Option<u32>,
    pages_loaded: u32,
    state: RequestState,
    cancel: CancelHandle,
}

impl ProfilePager {
    pub fn new(
        feed: ProfileFeed,
        cache: Arc<QueryCache>,
        page_size: u32,
    ) -> Result<Self, ProfilesError> {
        // Reject a bad page size up front rather than on the first load
        PageRequest::first(page_size)?;

        Ok(Self {
            feed,
            cache,
            page_size,
            profiles: Vec::new(),
            next_page: Some(0),
            pages_loaded: 0,
            state: RequestState::Idle,
            cancel: CancelHandle::default(),
        })
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Load the next page, from the cache when a fresh copy exists.
    ///
    /// Does nothing once pagination is over. After an error the same page
    /// is requested again on the next call.
    pub async fn load_next(&mut self) -> RequestState {
        let Some(page_number) = self.next_page else {
            return self.state.clone();
        };

        let request = match PageRequest::new(page_number, self.page_size) {
            Ok(request) => request,
            Err(error) => {
                self.state = RequestState::Error(error.to_string());
                return self.state.clone();
            }
        };
        let key = QueryKey::page(&request);

        if let Some(CachedValue::Page(page)) = self.cache.get_fresh(&key) {
            debug!("Serving page {} from cache", page_number);
            self.append(page);
            self.state = RequestState::Success;
            return self.state.clone();
        }

        self.state = RequestState::Loading;
        let generation = self.cancel.current();

        let outcome = self.feed.load_page(request).await;

        if self.cancel.current() != generation {
            debug!("Discarding cancelled load of page {}", page_number);
            self.state = RequestState::Idle;
            return self.state.clone();
        }

        self.state = match outcome {
            Ok(page) => {
                self.cache.put(key, CachedValue::Page(page.clone()));
                self.append(page);
                RequestState::Success
            }
            Err(error) => RequestState::Error(error.to_string()),
        };
        self.state.clone()
    }

    /// Start over from the first page, e.g. after the query was requalified.
    ///
    /// Drops accumulated profiles, cancels any in-flight load and marks
    /// cached pages stale so they are refetched.
    pub fn reset(&mut self) {
        self.cancel.cancel();
        self.cache.invalidate_pages();
        self.profiles.clear();
        self.next_page = Some(0);
        self.pages_loaded = 0;
        self.state = RequestState::Idle;
    }

    fn append(&mut self, page: ProfilePage) {
        self.profiles.extend(page.records);
        self.next_page = page.next_cursor;
        self.pages_loaded += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ProfileClient, RetryConfig};
    use crate::testing::{
        malformed_profile, raw_profile, status_reply, users_reply, ScriptedTransport,
    };
    use std::time::Duration;

    fn feed(transport: &Arc<ScriptedTransport>, retry: RetryConfig) -> ProfileFeed {
        ProfileFeed::new(ProfileClient::new(transport.clone()).with_retry(retry))
    }

    fn pager(transport: &Arc<ScriptedTransport>, cache: &Arc<QueryCache>) -> ProfilePager {
        ProfilePager::new(
            feed(transport, RetryConfig::new(1, Duration::ZERO)),
            cache.clone(),
            2,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_accumulates_until_short_page() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            users_reply(vec![raw_profile(1), raw_profile(2)]),
            users_reply(vec![raw_profile(3)]),
        ]));
        let cache = Arc::new(QueryCache::default());
        let mut pager = pager(&transport, &cache);

        assert_eq!(pager.state(), &RequestState::Idle);
        assert!(pager.has_more());

        assert_eq!(pager.load_next().await, RequestState::Success);
        assert!(pager.has_more());
        assert_eq!(pager.load_next().await, RequestState::Success);
        assert!(!pager.has_more());

        let ids: Vec<u64> = pager.profiles().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(pager.pages_loaded(), 2);

        // Exhausted pagers do not issue requests
        pager.load_next().await;
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_under_counted_page_stops_pagination() {
        let transport = Arc::new(ScriptedTransport::new(vec![users_reply(vec![
            raw_profile(1),
            malformed_profile(2),
        ])]));
        let cache = Arc::new(QueryCache::default());
        let mut pager = pager(&transport, &cache);

        pager.load_next().await;

        assert_eq!(pager.profiles().len(), 1);
        assert!(!pager.has_more());
    }

    #[tokio::test]
    async fn test_error_then_retry_same_page() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            status_reply(500),
            status_reply(500),
            users_reply(vec![raw_profile(1), raw_profile(2)]),
        ]));
        let cache = Arc::new(QueryCache::default());
        let mut pager = pager(&transport, &cache);

        let state = pager.load_next().await;
        assert_eq!(state, RequestState::Error("Failed to fetch profiles".to_string()));
        assert!(state.is_terminal());
        assert!(pager.profiles().is_empty());

        assert_eq!(pager.load_next().await, RequestState::Success);
        assert_eq!(pager.profiles().len(), 2);
        assert_eq!(transport.requests()[2].1[1], ("skip".to_string(), "0".to_string()));
    }

    #[tokio::test]
    async fn test_cached_page_is_served_without_io() {
        let transport = Arc::new(ScriptedTransport::new(vec![users_reply(vec![
            raw_profile(1),
            raw_profile(2),
        ])]));
        let cache = Arc::new(QueryCache::default());

        let mut first = pager(&transport, &cache);
        first.load_next().await;

        let mut second = pager(&transport, &cache);
        assert_eq!(second.load_next().await, RequestState::Success);

        assert_eq!(transport.calls(), 1);
        assert_eq!(second.profiles(), first.profiles());
    }

    #[tokio::test]
    async fn test_reset_refetches_from_first_page() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            users_reply(vec![raw_profile(1), raw_profile(2)]),
            users_reply(vec![raw_profile(5)]),
        ]));
        let cache = Arc::new(QueryCache::default());
        let mut pager = pager(&transport, &cache);

        pager.load_next().await;
        pager.reset();

        assert!(pager.profiles().is_empty());
        assert_eq!(pager.state(), &RequestState::Idle);
        assert!(pager.has_more());

        pager.load_next().await;
        assert_eq!(transport.calls(), 2);
        assert_eq!(pager.profiles()[0].id, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_load_is_discarded() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            status_reply(500),
            users_reply(vec![raw_profile(1), raw_profile(2)]),
        ]));
        let cache = Arc::new(QueryCache::default());
        let mut pager = ProfilePager::new(
            feed(&transport, RetryConfig::new(1, Duration::from_millis(1000))),
            cache.clone(),
            2,
        )
        .unwrap();
        let handle = pager.cancel_handle();

        let (state, _) = tokio::join!(pager.load_next(), async {
            // Lands while the first attempt's retry delay is pending
            tokio::time::sleep(Duration::from_millis(500)).await;
            handle.cancel();
        });

        assert_eq!(state, RequestState::Idle);
        assert!(pager.profiles().is_empty());
        assert!(pager.has_more());
        assert_eq!(transport.calls(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalid_page_size_is_rejected() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let result = ProfilePager::new(
            feed(&transport, RetryConfig::disabled()),
            Arc::new(QueryCache::default()),
            0,
        );
        assert!(matches!(result, Err(ProfilesError::InvalidArgument(_))));
    }
}
