use crate::errors::FolioError;
use crate::resources::resource::RedisManager;
use dashmap::DashMap;
use std::future::Future;

/// Integer counters addressed by key. Implementations must apply `incr_by` atomically,
/// concurrent increments of the same key are never lost.
pub trait CounterStore: Send + Sync {
    /// Current value of `key`, `None` if it was never incremented.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<i64>, FolioError>> + Send;

    /// Adds `delta` to `key` (absent keys start at zero) and returns the resulting value.
    fn incr_by(&self, key: &str, delta: i64) -> impl Future<Output = Result<i64, FolioError>> + Send;
}

#[derive(Clone)]
pub struct RedisStore {
    pool: deadpool::managed::Pool<RedisManager>,
}

impl RedisStore {
    pub fn new(pool: &deadpool::managed::Pool<RedisManager>) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn ping(&self) -> Result<(), FolioError> {
        let mut connection = self.pool.get().await?;

        redis::cmd("PING").query_async::<()>(&mut *connection).await?;

        Ok(())
    }
}

impl CounterStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<i64>, FolioError> {
        let mut connection = self.pool.get().await?;

        let value = redis::cmd("GET")
            .arg(key)
            .query_async::<Option<i64>>(&mut *connection)
            .await?;

        Ok(value)
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64, FolioError> {
        let mut connection = self.pool.get().await?;

        let value = redis::cmd("INCRBY")
            .arg(key)
            .arg(delta)
            .query_async::<i64>(&mut *connection)
            .await?;

        Ok(value)
    }
}

/// Process local store, used when no redis is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    counts: DashMap<String, i64>,
}

impl CounterStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<i64>, FolioError> {
        Ok(self.counts.get(key).map(|count| *count))
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64, FolioError> {
        // the entry guard holds the shard lock, so the add is atomic per key
        let mut count = self.counts.entry(key.to_string()).or_insert(0);
        *count = count
            .checked_add(delta)
            .ok_or_else(|| FolioError::InternalServerError(format!("Incrementing {} would overflow", key)))?;

        Ok(*count)
    }
}

/// Store selected by configuration.
pub enum Store {
    Redis(RedisStore),
    Memory(MemoryStore),
}

impl Store {
    pub fn kind(&self) -> &'static str {
        match self {
            Store::Redis(_) => "redis",
            Store::Memory(_) => "memory",
        }
    }

    /// Verifies the store is reachable. Memory stores always are.
    pub async fn check(&self) -> Result<(), FolioError> {
        match self {
            Store::Redis(store) => store.ping().await,
            Store::Memory(_) => Ok(()),
        }
    }
}

impl CounterStore for Store {
    async fn get(&self, key: &str) -> Result<Option<i64>, FolioError> {
        match self {
            Store::Redis(store) => store.get(key).await,
            Store::Memory(store) => store.get(key).await,
        }
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64, FolioError> {
        match self {
            Store::Redis(store) => store.incr_by(key, delta).await,
            Store::Memory(store) => store.incr_by(key, delta).await,
        }
    }
}
