use std::time::Duration;

use deadpool::managed::{Metrics, Pool, RecycleResult};
use deadpool::Runtime;
use redis::aio::MultiplexedConnection;

use crate::config::{Config, RedisCfg, StoreKind};
use crate::errors::FolioError;
use crate::resources::counter_store::{MemoryStore, RedisStore, Store};

/// Resource's should be alive during application runtime.
/// It's usually related to external services like the redis pool
/// or the counter store built on top of it.
pub trait Resource<'a>: Sized {
    type Cfg;

    async fn init_resource(config: Self::Cfg) -> Result<Self, FolioError>;
}

/// Hands out multiplexed redis connections to the pool.
pub struct RedisManager {
    client: redis::Client,
}

impl RedisManager {
    pub fn new(url: &str) -> Result<Self, FolioError> {
        let client = redis::Client::open(url)?;

        Ok(Self { client })
    }
}

impl deadpool::managed::Manager for RedisManager {
    type Type = MultiplexedConnection;
    type Error = redis::RedisError;

    async fn create(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    async fn recycle(&self, connection: &mut MultiplexedConnection, _: &Metrics) -> RecycleResult<redis::RedisError> {
        redis::cmd("PING").query_async::<()>(connection).await?;

        Ok(())
    }
}

impl<'a> Resource<'a> for Pool<RedisManager> {
    type Cfg = &'a RedisCfg;

    async fn init_resource(config: &'a RedisCfg) -> Result<Self, FolioError> {
        let manager = RedisManager::new(&config.url)?;
        let timeout = Duration::from_millis(config.connection_timeout_ms);

        Pool::builder(manager)
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .create_timeout(Some(timeout))
            .wait_timeout(Some(timeout))
            .build()
            .map_err(|e| FolioError::ConfigError(format!("Failed to create redis pool: {}", e)))
    }
}

impl<'a> Resource<'a> for Store {
    type Cfg = &'a Config;

    async fn init_resource(config: &'a Config) -> Result<Self, FolioError> {
        match config.store.kind {
            StoreKind::Redis => {
                let pool = Pool::<RedisManager>::init_resource(&config.redis).await?;

                Ok(Store::Redis(RedisStore::new(&pool)))
            }
            StoreKind::Memory => Ok(Store::Memory(MemoryStore::default())),
        }
    }
}
