use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::client::like_client::LikeClient;
use crate::client::session_likes::SessionLikes;
use crate::config::LikeSettings;
use crate::errors::FolioError;
use crate::models::slug::Slug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Idle,
    Accumulating,
    Flushing,
}

#[derive(Default)]
struct PostLikes {
    displayed: i64,
    /// clicks not yet sent
    pending: i64,
    /// clicks sent and awaiting the server
    in_flight: i64,
    /// bumped whenever the idle timer is re-armed, older timers find a mismatch and do nothing
    generation: u64,
}

impl PostLikes {
    fn phase(&self) -> BatchPhase {
        if self.in_flight > 0 {
            BatchPhase::Flushing
        } else if self.pending > 0 {
            BatchPhase::Accumulating
        } else {
            BatchPhase::Idle
        }
    }
}

struct BatcherState {
    posts: HashMap<Slug, PostLikes>,
    session: SessionLikes,
}

struct Inner<C: LikeClient> {
    client: C,
    idle: Duration,
    state: Mutex<BatcherState>,
}

impl<C: LikeClient> Inner<C> {
    fn lock(&self) -> MutexGuard<'_, BatcherState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Collects like clicks per post and sends them as one increment once the post has been
/// idle for the configured delay. Every click re-arms the delay.
///
/// The displayed count is optimistic: it always equals the last known server count plus
/// the clicks that are pending or in flight. A failed flush takes its clicks back out of
/// both the displayed count and the session's like budget. Failed flushes are not retried.
///
/// One flush per post is in flight at a time; clicks made meanwhile form the next batch.
/// Timers are never cancelled, a superseded timer wakes up and finds a newer generation.
/// Must be used from within a tokio runtime.
pub struct LikeBatcher<C: LikeClient> {
    inner: Arc<Inner<C>>,
}

impl<C: LikeClient> Clone for LikeBatcher<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C: LikeClient> LikeBatcher<C> {
    pub fn new(client: C, idle: Duration, session: SessionLikes) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                idle,
                state: Mutex::new(BatcherState {
                    posts: HashMap::new(),
                    session,
                }),
            }),
        }
    }

    /// Batcher using the server's settings, resuming a saved session when given one.
    pub fn from_settings(client: C, settings: LikeSettings, saved_session: Option<&str>) -> Self {
        let session = match saved_session {
            Some(json) => SessionLikes::from_json(json, settings.max_likes_per_post),
            None => SessionLikes::new(settings.max_likes_per_post),
        };

        Self::new(client, settings.flush_idle(), session)
    }

    /// Seeds the displayed count with the server's count, e.g. on page load.
    pub fn track(&self, slug: &Slug, likes: i64) {
        let mut state = self.inner.lock();
        let post = state.posts.entry(slug.clone()).or_default();

        post.displayed = likes + post.pending + post.in_flight;
    }

    /// Registers a click. Returns the new displayed count, or `None` when the session has
    /// used up its likes for this post, in which case nothing changes.
    pub fn click(&self, slug: &Slug) -> Option<i64> {
        let mut state = self.inner.lock();

        if !state.session.record(slug) {
            debug!("Like cap reached for {}", slug);

            return None;
        }

        let post = state.posts.entry(slug.clone()).or_default();
        post.pending += 1;
        post.displayed += 1;
        let displayed = post.displayed;

        arm(&self.inner, post, slug.clone());

        Some(displayed)
    }

    pub fn displayed(&self, slug: &Slug) -> i64 {
        self.inner.lock().posts.get(slug).map_or(0, |post| post.displayed)
    }

    pub fn pending(&self, slug: &Slug) -> i64 {
        self.inner.lock().posts.get(slug).map_or(0, |post| post.pending)
    }

    pub fn phase(&self, slug: &Slug) -> BatchPhase {
        self.inner
            .lock()
            .posts
            .get(slug)
            .map_or(BatchPhase::Idle, PostLikes::phase)
    }

    pub fn user_likes(&self, slug: &Slug) -> u32 {
        self.inner.lock().session.get(slug)
    }

    pub fn remaining(&self, slug: &Slug) -> u32 {
        self.inner.lock().session.remaining(slug)
    }

    pub fn is_max_reached(&self, slug: &Slug) -> bool {
        self.inner.lock().session.is_max_reached(slug)
    }

    /// Serialized session likes, to be persisted by the caller.
    pub fn session_json(&self) -> Result<String, FolioError> {
        self.inner.lock().session.to_json()
    }
}

/// Starts a new idle window for `post`, superseding any earlier one.
fn arm<C: LikeClient>(inner: &Arc<Inner<C>>, post: &mut PostLikes, slug: Slug) {
    post.generation += 1;
    let generation = post.generation;
    let inner = inner.clone();

    tokio::spawn(async move {
        tokio::time::sleep(inner.idle).await;
        flush(inner, slug, generation).await;
    });
}

async fn flush<C: LikeClient>(inner: Arc<Inner<C>>, slug: Slug, generation: u64) {
    let delta = {
        let mut state = inner.lock();
        let Some(post) = state.posts.get_mut(&slug) else {
            return;
        };

        if post.generation != generation {
            return;
        }

        // a running flush re-arms the timer once it resolves
        if post.in_flight > 0 || post.pending == 0 {
            return;
        }

        post.in_flight = post.pending;
        post.pending = 0;
        post.in_flight
    };

    debug!("Flushing {} likes for {}", delta, slug);
    let outcome = inner.client.increment(&slug, delta).await;

    let mut state = inner.lock();
    let BatcherState { posts, session } = &mut *state;
    let Some(post) = posts.get_mut(&slug) else {
        return;
    };

    if outcome.success {
        post.displayed = outcome.likes + post.pending;
    } else {
        post.displayed -= delta;
        session.revert(&slug, u32::try_from(delta).unwrap_or(u32::MAX));
    }
    post.in_flight = 0;

    if post.pending > 0 {
        arm(&inner, post, slug);
    }
}
