// In-memory response cache with per-entry TTL.
// Repeated page loads within the window reuse prior upstream results
// instead of re-querying the API.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;
use crate::github::{CommitRecord, ContributionsCollection, UserProfile};

use super::clock::{Clock, SystemClock};

/// Default TTL for cached upstream responses: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached value with its fetch timestamp.
#[derive(Debug, Clone)]
pub struct CachedValue<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CachedValue<T> {
    fn new(value: T, fetched_at: DateTime<Utc>) -> Self {
        Self { value, fetched_at }
    }

    /// Check whether this entry is still within its TTL at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let elapsed = now
            .signed_duration_since(self.fetched_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed <= ttl
    }
}

/// Expiring key-value store for one upstream operation.
pub struct TtlCache<T> {
    entries: Mutex<HashMap<String, CachedValue<T>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    /// Create a cache with the given TTL and the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    /// Look up a fresh entry for `key`. Stale entries are treated as
    /// absent and overwritten by the next insert.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let entries = self.entries.lock().expect("cache mutex poisoned");
        entries
            .get(key)
            .filter(|cached| cached.is_fresh(now, self.ttl))
            .map(|cached| cached.value.clone())
    }

    /// Store a value for `key`, stamping it with the current time.
    pub fn insert(&self, key: &str, value: T) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(key.to_string(), CachedValue::new(value, now));
    }

    /// Return the cached value for `key`, or run `fetch` and store its
    /// result.
    ///
    /// Errors are not cached; the next call retries. There is no
    /// single-flight de-duplication: two concurrent misses may both
    /// fetch, and the later write wins, which is harmless for identical
    /// keys.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.get(key) {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, "cache miss");
        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}

/// One cache per upstream operation.
///
/// Profile entries are keyed by access token, calendar and commit entries
/// by username. Keeping separate maps per operation makes cross-operation
/// key collisions impossible.
pub struct ResponseCache {
    pub profiles: TtlCache<UserProfile>,
    pub calendars: TtlCache<ContributionsCollection>,
    pub commits: TtlCache<Vec<CommitRecord>>,
}

impl ResponseCache {
    /// Create a response cache with the default 5-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a response cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a response cache with a custom TTL and injected clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles: TtlCache::with_clock(ttl, clock.clone()),
            calendars: TtlCache::with_clock(ttl, clock.clone()),
            commits: TtlCache::with_clock(ttl, clock),
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
