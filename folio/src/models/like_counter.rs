use futures::future::join_all;
use log::error;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::slug::Slug;
use crate::resources::counter_store::CounterStore;
use crate::resources::read_cache::ReadCache;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LikeCount {
    pub slug: Slug,
    pub likes: i64,
}

/// Result of an increment. Store failures come back as `success: false` with zero likes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct IncrementOutcome {
    pub success: bool,
    pub likes: i64,
}

impl IncrementOutcome {
    pub fn succeeded(likes: i64) -> Self {
        Self { success: true, likes }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            likes: 0,
        }
    }
}

/// Body of a like request; a missing body or count means a single like.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct LikeRequest {
    #[serde(default = "single_like")]
    pub count: i64,
}

impl Default for LikeRequest {
    fn default() -> Self {
        Self { count: single_like() }
    }
}

fn single_like() -> i64 {
    1
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LikeUpdate {
    pub slug: Slug,
    pub success: bool,
    pub likes: i64,
}

impl LikeUpdate {
    pub fn new(slug: Slug, outcome: IncrementOutcome) -> Self {
        Self {
            slug,
            success: outcome.success,
            likes: outcome.likes,
        }
    }
}

/// Reads and increments per-post like counts. Reads may be served from a short lived
/// cache; increments always go to the store as a single atomic add.
pub struct LikeCounter<S: CounterStore> {
    store: S,
    cache: Option<ReadCache>,
}

impl<S: CounterStore> LikeCounter<S> {
    /// A zero `cache_ttl` disables caching.
    pub fn new(store: S, cache_ttl: Duration) -> Self {
        let cache = if cache_ttl.is_zero() {
            None
        } else {
            Some(ReadCache::new(cache_ttl))
        };

        Self { store, cache }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache.as_ref().map(ReadCache::ttl)
    }

    /// Current like count, `0` for unknown posts and whenever the store fails.
    pub async fn read(&self, slug: &Slug) -> i64 {
        if let Some(likes) = self.cache.as_ref().and_then(|cache| cache.get(slug)) {
            return likes;
        }

        match self.store.get(&slug.likes_key()).await {
            Ok(likes) => {
                let likes = likes.unwrap_or(0);

                if let Some(cache) = &self.cache {
                    cache.insert(slug, likes);
                }

                likes
            }
            Err(e) => {
                error!("Error fetching likes for {}: {}", slug, e);

                0
            }
        }
    }

    pub async fn read_many(&self, slugs: &[Slug]) -> Vec<LikeCount> {
        let counts = join_all(slugs.iter().map(|slug| self.read(slug))).await;

        slugs
            .iter()
            .zip(counts)
            .map(|(slug, likes)| LikeCount {
                slug: slug.clone(),
                likes,
            })
            .collect()
    }

    /// Atomically adds `delta` likes. The new count is written through to the cache.
    pub async fn increment(&self, slug: &Slug, delta: i64) -> IncrementOutcome {
        match self.store.incr_by(&slug.likes_key(), delta).await {
            Ok(likes) => {
                if let Some(cache) = &self.cache {
                    cache.insert(slug, likes);
                }

                IncrementOutcome::succeeded(likes)
            }
            Err(e) => {
                error!("Error adding {} likes to {}: {}", delta, slug, e);

                IncrementOutcome::failed()
            }
        }
    }

    /// Drops expired cache entries, returns how many were removed.
    pub fn prune_cache(&self) -> usize {
        self.cache.as_ref().map_or(0, ReadCache::prune)
    }
}
