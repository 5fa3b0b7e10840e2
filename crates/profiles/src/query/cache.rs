//! Explicit query cache context.
//!
//! Holds fetched pages and profiles for consumers. The cache is an ordinary
//! value shared through `Arc`; its lifecycle is driven by the owner:
//!
//! - **init**: accept reads and writes (a new cache starts initialised)
//! - **invalidate**: mark entries stale so the next read refetches
//! - **teardown**: drop every entry and ignore writes until `init`
//!
//! Entries are fresh for `stale_time` and evicted after `gc_time`.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::models::{PageRequest, Profile, ProfileId, ProfilePage};

/// Default time an entry is served without refetching.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// Default time an entry is kept at all.
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(10 * 60);

/// Cache timing configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub stale_time: Duration,
    pub gc_time: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            gc_time: DEFAULT_GC_TIME,
        }
    }
}

/// Identity of a cached query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Page { page_number: u32, page_size: u32 },
    Profile(ProfileId),
}

impl QueryKey {
    pub fn page(request: &PageRequest) -> Self {
        Self::Page {
            page_number: request.page_number(),
            page_size: request.page_size(),
        }
    }

    pub fn profile(id: &ProfileId) -> Self {
        Self::Profile(id.clone())
    }

    fn is_page(&self) -> bool {
        matches!(self, Self::Page { .. })
    }
}

/// Cached query result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CachedValue {
    Page(ProfilePage),
    Profile(Profile),
}

/// A cache read: the value and whether it should be refetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheHit {
    pub value: CachedValue,
    pub is_stale: bool,
}

#[derive(Debug)]
struct Entry {
    value: CachedValue,
    stored_at: Instant,
    invalidated: bool,
}

#[derive(Debug)]
struct Inner {
    active: bool,
    entries: HashMap<QueryKey, Entry>,
}

/// Thread-safe query cache with an explicit lifecycle.
#[derive(Debug)]
pub struct QueryCache {
    inner: RwLock<Inner>,
    config: CacheConfig,
}

impl QueryCache {
    /// Create an initialised cache.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: RwLock::new(Inner {
                active: true,
                entries: HashMap::new(),
            }),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("Query cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|poisoned| {
            warn!("Query cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// (Re)enable the cache after [`teardown`](Self::teardown). Idempotent.
    pub fn init(&self) {
        let mut inner = self.write();
        if !inner.active {
            debug!("Query cache initialised");
        }
        inner.active = true;
    }

    /// Drop every entry and stop accepting writes.
    pub fn teardown(&self) {
        let mut inner = self.write();
        inner.entries.clear();
        inner.active = false;
        debug!("Query cache torn down");
    }

    pub fn is_active(&self) -> bool {
        self.read().active
    }

    /// Number of entries held, expired ones included until collected.
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read an entry. Entries older than `gc_time` are treated as absent.
    pub fn get(&self, key: &QueryKey) -> Option<CacheHit> {
        let inner = self.read();
        if !inner.active {
            return None;
        }

        let entry = inner.entries.get(key)?;
        let age = entry.stored_at.elapsed();
        if age >= self.config.gc_time {
            return None;
        }

        Some(CacheHit {
            value: entry.value.clone(),
            is_stale: entry.invalidated || age >= self.config.stale_time,
        })
    }

    /// Read an entry only if it is still fresh.
    pub fn get_fresh(&self, key: &QueryKey) -> Option<CachedValue> {
        self.get(key)
            .filter(|hit| !hit.is_stale)
            .map(|hit| hit.value)
    }

    /// Store a result. Ignored while torn down.
    pub fn put(&self, key: QueryKey, value: CachedValue) {
        let mut inner = self.write();
        if !inner.active {
            debug!("Ignoring write to torn-down query cache: {:?}", key);
            return;
        }

        let gc_time = self.config.gc_time;
        inner
            .entries
            .retain(|_, entry| entry.stored_at.elapsed() < gc_time);
        inner.entries.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
                invalidated: false,
            },
        );
    }

    /// Mark one entry stale. Returns whether the entry existed.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        match self.write().entries.get_mut(key) {
            Some(entry) => {
                entry.invalidated = true;
                true
            }
            None => false,
        }
    }

    /// Mark every cached page stale, leaving single-profile entries alone.
    pub fn invalidate_pages(&self) {
        self.write()
            .entries
            .iter_mut()
            .filter(|(key, _)| key.is_page())
            .for_each(|(_, entry)| entry.invalidated = true);
    }

    /// Mark every entry stale.
    pub fn invalidate_all(&self) {
        self.write()
            .entries
            .values_mut()
            .for_each(|entry| entry.invalidated = true);
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
