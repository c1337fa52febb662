use actix_cors::Cors;
use actix_web::http;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::FolioError;
use crate::models::article::ArticleCatalog;
use crate::models::like_counter::LikeCounter;
use crate::resources::counter_store::Store;
use crate::resources::resource::Resource;
use crate::utils::logger::{log_success, log_warning};

pub struct App {
    pub config: Config,
    pub like_counter: Arc<LikeCounter<Store>>,
    pub catalog: Arc<ArticleCatalog>,
}

impl App {
    pub async fn new() -> Result<Self, FolioError> {
        let config = Config::load()?;

        Self::from_config(config).await
    }

    pub async fn from_config(config: Config) -> Result<Self, FolioError> {
        let store = Store::init_resource(&config).await?;
        let like_counter = LikeCounter::new(store, config.likes.cache_ttl());
        let catalog = ArticleCatalog::new(config.articles.clone());

        Ok(Self {
            config,
            like_counter: Arc::new(like_counter),
            catalog: Arc::new(catalog),
        })
    }

    /// Init processes that need to be run on startup
    pub async fn init(&self) {
        // init logger
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

        // an unreachable store is not fatal, likes read as zero until it comes back
        let kind = self.like_counter.store().kind();
        match self.like_counter.store().check().await {
            Ok(()) => log_success(format!("Connected to {} store", kind)),
            Err(e) => log_warning(format!("{} store unavailable, likes will read as 0: {}", kind, e)),
        }

        if !self.catalog.is_empty() {
            log_success(format!("Loaded {} articles", self.catalog.articles().len()));
        }
    }

    pub fn cors(&self) -> Cors {
        let cors = if self.config.allowed_origin == "*" {
            Cors::default().allow_any_origin()
        } else {
            Cors::default().allowed_origin(self.config.allowed_origin.as_str())
        };

        cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::ORIGIN,
                http::header::USER_AGENT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(86400)
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn bind_address(&self) -> &str {
        &self.config.bind_address
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    impl App {
        /// App over an in-memory store, `extra` is appended to the base config.
        pub async fn for_tests(extra: &str) -> Self {
            let contents = format!(
                "port = 3000\nallowed_origin = \"*\"\n\n[store]\nkind = \"memory\"\n\n{}",
                extra
            );
            let config = Config::from_toml_str(&contents).expect("Could not parse test config");

            App::from_config(config).await.expect("Could not create app")
        }
    }

    #[tokio::test]
    async fn builds_from_memory_config() {
        let app = App::for_tests("").await;

        assert_eq!(app.like_counter.store().kind(), "memory");
        assert!(app.like_counter.store().check().await.is_ok());
        assert!(app.catalog.is_empty());
        assert_eq!(app.port(), 3000);
    }

    #[tokio::test]
    async fn redis_pool_is_created_lazily() {
        let config = Config::from_toml_str(
            r#"
            port = 3000
            allowed_origin = "*"

            [redis]
            url = "redis://127.0.0.1:1"
            connection_timeout_ms = 50
            "#,
        )
        .unwrap();

        let app = App::from_config(config).await.unwrap();

        assert_eq!(app.like_counter.store().kind(), "redis");
        assert!(app.like_counter.store().check().await.is_err());

        // an unreachable redis degrades to zero counts instead of failing callers
        let slug = crate::models::slug::Slug::parse("offline").unwrap();
        assert_eq!(app.like_counter.read(&slug).await, 0);
        assert!(!app.like_counter.increment(&slug, 1).await.success);
    }
}
