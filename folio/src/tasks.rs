use log::debug;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::models::like_counter::LikeCounter;
use crate::resources::counter_store::CounterStore;

/// Periodically drops expired read cache entries so slugs that stop being read
/// do not stay in memory. Returns `None` when caching is disabled.
pub fn prune_read_cache_task<S>(like_counter: Arc<LikeCounter<S>>) -> Option<JoinHandle<()>>
where
    S: CounterStore + 'static,
{
    let every = like_counter.cache_ttl()?;
    let mut prune_interval = time::interval(every);

    Some(tokio::spawn(async move {
        loop {
            prune_interval.tick().await;

            let pruned = like_counter.prune_cache();
            if pruned > 0 {
                debug!("Pruned {} expired like counts", pruned);
            }
        }
    }))
}
