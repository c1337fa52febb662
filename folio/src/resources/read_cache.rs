use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::models::slug::Slug;

struct CachedCount {
    likes: i64,
    cached_at: Instant,
}

/// Short lived like counts. Entries older than `ttl` are treated as missing and
/// removed by [`ReadCache::prune`].
pub struct ReadCache {
    ttl: Duration,
    entries: DashMap<Slug, CachedCount>,
}

impl ReadCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, slug: &Slug) -> Option<i64> {
        let entry = self.entries.get(slug)?;

        if entry.cached_at.elapsed() < self.ttl {
            Some(entry.likes)
        } else {
            None
        }
    }

    pub fn insert(&self, slug: &Slug, likes: i64) {
        self.entries.insert(
            slug.clone(),
            CachedCount {
                likes,
                cached_at: Instant::now(),
            },
        );
    }

    /// Drops expired entries, returns how many were removed.
    pub fn prune(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.cached_at.elapsed() < self.ttl);

        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
