//! Consumer-side query support.
//!
//! Building blocks for list and detail views sitting on top of
//! [`ProfileFeed`](crate::feed::ProfileFeed):
//! - `cache` - `QueryCache`, an explicit cache context with init/invalidate/teardown
//! - `pager` - `ProfilePager`, page accumulation with a request state and cancel hook
//! - `lookup` - `ProfileLookup`, cached single-profile lookups

mod cache;
mod lookup;
mod pager;

pub use cache::{
    CacheConfig, CacheHit, CachedValue, QueryCache, QueryKey, DEFAULT_GC_TIME, DEFAULT_STALE_TIME,
};
pub use lookup::ProfileLookup;
pub use pager::{CancelHandle, ProfilePager, RequestState};
