use std::time::Duration;
use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_FLUSH_IDLE_MS, DEFAULT_MAX_LIKES_PER_POST};
use crate::errors::FolioError;
use crate::models::article::Article;
use crate::utils::logger::log_warning;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    pub port: u16,
    pub allowed_origin: String,

    #[serde(default)]
    pub redis: RedisCfg,

    #[serde(default)]
    pub store: StoreCfg,

    #[serde(default)]
    pub likes: LikesCfg,

    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RedisCfg {
    pub url: String,

    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,
}

impl Default for RedisCfg {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            pool_size: default_pool_size(),
            connection_timeout_ms: default_connection_timeout_ms(),
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Redis,
    Memory,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct StoreCfg {
    #[serde(default)]
    pub kind: StoreKind,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LikesCfg {
    /// `0` disables the read cache.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_max_likes_per_post")]
    pub max_likes_per_post: u32,

    #[serde(default = "default_flush_idle_ms")]
    pub flush_idle_ms: u64,
}

impl Default for LikesCfg {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            max_likes_per_post: default_max_likes_per_post(),
            flush_idle_ms: default_flush_idle_ms(),
        }
    }
}

/// The part of [`LikesCfg`] clients need.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeSettings {
    pub max_likes_per_post: u32,
    pub flush_idle_ms: u64,
}

impl From<&LikesCfg> for LikeSettings {
    fn from(cfg: &LikesCfg) -> Self {
        Self {
            max_likes_per_post: cfg.max_likes_per_post,
            flush_idle_ms: cfg.flush_idle_ms,
        }
    }
}

impl LikeSettings {
    pub fn flush_idle(&self) -> Duration {
        Duration::from_millis(self.flush_idle_ms)
    }
}

impl LikesCfg {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Config {
    /// Reads `config.<ENV>.toml` from the working directory, `ENV` defaults to `development`.
    pub fn load() -> Result<Self, FolioError> {
        dotenv::dotenv().ok();

        let env = env::var("ENV").unwrap_or_else(|_| {
            log_warning("ENV not set, using development");
            "development".to_string()
        });
        let config_file = format!("config.{}.toml", env);

        let contents = fs::read_to_string(&config_file)
            .map_err(|e| FolioError::ConfigError(format!("Unable to read {}: {}", config_file, e)))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, FolioError> {
        let config: Config = toml::from_str(contents)?;

        if config.likes.max_likes_per_post == 0 {
            return Err(FolioError::ConfigError(
                "likes.max_likes_per_post must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_pool_size() -> usize {
    16
}

fn default_connection_timeout_ms() -> u64 {
    3000
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

fn default_max_likes_per_post() -> u32 {
    DEFAULT_MAX_LIKES_PER_POST
}

fn default_flush_idle_ms() -> u64 {
    DEFAULT_FLUSH_IDLE_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_defaults() {
        let config = Config::from_toml_str(
            r#"
            port = 3000
            allowed_origin = "http://localhost:5173"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.store.kind, StoreKind::Redis);
        assert_eq!(config.redis.url, "redis://127.0.0.1:6379");
        assert_eq!(config.likes.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.likes.max_likes_per_post, 12);
        assert_eq!(LikeSettings::from(&config.likes).flush_idle(), Duration::from_millis(500));
        assert!(config.articles.is_empty());
    }

    #[test]
    fn parses_full_config() {
        let config = Config::from_toml_str(
            r#"
            bind_address = "0.0.0.0"
            port = 8080
            allowed_origin = "https://example.com"

            [redis]
            url = "redis://cache:6379"
            pool_size = 4

            [store]
            kind = "memory"

            [likes]
            cache_ttl_secs = 0
            max_likes_per_post = 9

            [[articles]]
            title = "Rewriting my website from scratch"
            caption = "It was time to add a blog!"
            published_date = "2025-11-16"
            slug = "rewriting-my-website-from-scratch"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.redis.pool_size, 4);
        assert_eq!(config.redis.connection_timeout_ms, 3000);
        assert_eq!(config.store.kind, StoreKind::Memory);
        assert_eq!(config.likes.cache_ttl_secs, 0);
        assert_eq!(config.likes.max_likes_per_post, 9);
        assert_eq!(config.articles.len(), 1);
        assert_eq!(config.articles[0].slug.as_str(), "rewriting-my-website-from-scratch");
    }

    #[test]
    fn rejects_zero_like_cap() {
        let result = Config::from_toml_str(
            r#"
            port = 3000
            allowed_origin = "*"

            [likes]
            max_likes_per_post = 0
            "#,
        );

        assert!(matches!(result, Err(FolioError::ConfigError(_))));
    }

    #[test]
    fn rejects_invalid_article_slug() {
        let result = Config::from_toml_str(
            r#"
            port = 3000
            allowed_origin = "*"

            [[articles]]
            title = "Bad"
            caption = "Bad"
            published_date = "2025-01-01"
            slug = "not a slug"
            "#,
        );

        assert!(result.is_err());
    }
}
