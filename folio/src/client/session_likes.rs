use log::warn;
use std::collections::HashMap;

use crate::errors::FolioError;
use crate::models::slug::Slug;

/// Likes given by the current visitor during one session, keyed by post.
///
/// This is a soft guard: it lives with the client and anyone can reset it, the server
/// accepts any positive increment.
#[derive(Clone, Debug)]
pub struct SessionLikes {
    counts: HashMap<Slug, u32>,
    max_per_post: u32,
}

impl SessionLikes {
    pub fn new(max_per_post: u32) -> Self {
        Self {
            counts: HashMap::new(),
            max_per_post,
        }
    }

    /// Restores a saved session. Unreadable data starts a fresh session.
    pub fn from_json(json: &str, max_per_post: u32) -> Self {
        match serde_json::from_str::<HashMap<Slug, u32>>(json) {
            Ok(counts) => Self { counts, max_per_post },
            Err(e) => {
                warn!("Error parsing session likes: {}", e);

                Self::new(max_per_post)
            }
        }
    }

    pub fn to_json(&self) -> Result<String, FolioError> {
        Ok(serde_json::to_string(&self.counts)?)
    }

    pub fn max_per_post(&self) -> u32 {
        self.max_per_post
    }

    pub fn get(&self, slug: &Slug) -> u32 {
        self.counts.get(slug).copied().unwrap_or(0)
    }

    pub fn is_max_reached(&self, slug: &Slug) -> bool {
        self.get(slug) >= self.max_per_post
    }

    pub fn remaining(&self, slug: &Slug) -> u32 {
        self.max_per_post.saturating_sub(self.get(slug))
    }

    /// Counts one like, `false` once the cap is reached.
    pub fn record(&mut self, slug: &Slug) -> bool {
        if self.is_max_reached(slug) {
            return false;
        }

        *self.counts.entry(slug.clone()).or_insert(0) += 1;

        true
    }

    pub fn revert(&mut self, slug: &Slug, likes: u32) {
        if let Some(count) = self.counts.get_mut(slug) {
            *count = count.saturating_sub(likes);
        }
    }
}
