use log::warn;
use std::future::Future;

use crate::config::LikeSettings;
use crate::errors::FolioError;
use crate::models::like_counter::{IncrementOutcome, LikeCount, LikeCounter, LikeRequest, LikeUpdate};
use crate::models::slug::Slug;
use crate::resources::counter_store::CounterStore;

/// Sends accumulated likes to whoever owns the counters.
pub trait LikeClient: Send + Sync + 'static {
    fn increment(&self, slug: &Slug, delta: i64) -> impl Future<Output = IncrementOutcome> + Send;
}

impl<S: CounterStore + 'static> LikeClient for LikeCounter<S> {
    async fn increment(&self, slug: &Slug, delta: i64) -> IncrementOutcome {
        LikeCounter::increment(self, slug, delta).await
    }
}

/// Talks to the `/likes` endpoints of a running server.
#[derive(Clone)]
pub struct HttpLikeClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLikeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { http, base_url }
    }

    fn likes_url(&self, slug: &Slug) -> String {
        format!("{}/likes/{}", self.base_url, slug)
    }

    pub async fn settings(&self) -> Result<LikeSettings, FolioError> {
        let settings = self
            .http
            .get(format!("{}/settings", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(settings)
    }

    pub async fn likes(&self, slug: &Slug) -> Result<i64, FolioError> {
        let count: LikeCount = self
            .http
            .get(self.likes_url(slug))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(count.likes)
    }

    pub async fn add_likes(&self, slug: &Slug, delta: i64) -> Result<LikeUpdate, FolioError> {
        let update = self
            .http
            .post(self.likes_url(slug))
            .json(&LikeRequest { count: delta })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(update)
    }
}

impl LikeClient for HttpLikeClient {
    async fn increment(&self, slug: &Slug, delta: i64) -> IncrementOutcome {
        match self.add_likes(slug, delta).await {
            Ok(update) if update.success => IncrementOutcome::succeeded(update.likes),
            Ok(_) => IncrementOutcome::failed(),
            Err(e) => {
                warn!("Could not send {} likes for {}: {}", delta, slug, e);

                IncrementOutcome::failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes;
    use crate::app::App;
    use crate::client::batcher::LikeBatcher;
    use crate::client::session_likes::SessionLikes;
    use actix_web::dev::ServerHandle;
    use actix_web::{web, App as ActixWebApp, HttpServer};
    use std::time::Duration;

    async fn start_server() -> (String, ServerHandle) {
        let app = web::Data::new(App::for_tests("").await);

        let server = HttpServer::new(move || ActixWebApp::new().app_data(app.clone()).configure(routes))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("Could not bind test server");
        let address = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        (format!("http://{}", address), handle)
    }

    #[actix_web::test]
    async fn round_trips_through_the_api() {
        let (base_url, server) = start_server().await;
        let client = HttpLikeClient::new(base_url);
        let slug = Slug::parse("hello-world").unwrap();

        assert_eq!(client.likes(&slug).await.unwrap(), 0);

        let update = client.add_likes(&slug, 41).await.unwrap();
        assert_eq!(update, LikeUpdate { slug: slug.clone(), success: true, likes: 41 });

        assert_eq!(LikeClient::increment(&client, &slug, 3).await, IncrementOutcome::succeeded(44));
        assert_eq!(client.likes(&slug).await.unwrap(), 44);

        assert!(client.add_likes(&slug, 0).await.is_err());

        server.stop(true).await;
    }

    #[actix_web::test]
    async fn batcher_flushes_over_http() {
        let (base_url, server) = start_server().await;
        let client = HttpLikeClient::new(base_url.clone());
        let slug = Slug::parse("batched-over-http").unwrap();

        let settings = client.settings().await.unwrap();
        assert_eq!(settings.max_likes_per_post, 12);

        let likes = LikeBatcher::new(
            client,
            Duration::from_millis(50),
            SessionLikes::new(settings.max_likes_per_post),
        );
        likes.track(&slug, 0);
        likes.click(&slug);
        likes.click(&slug);
        likes.click(&slug);

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(likes.displayed(&slug), 3);
        assert_eq!(HttpLikeClient::new(base_url).likes(&slug).await.unwrap(), 3);

        server.stop(true).await;
    }

    #[test]
    fn builds_urls_without_double_slashes() {
        let client = HttpLikeClient::new("http://localhost:3000/");
        let slug = Slug::parse("hello-world").unwrap();

        assert_eq!(client.likes_url(&slug), "http://localhost:3000/likes/hello-world");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_failed_increment() {
        // port 9 (discard) is closed on test machines
        let client = HttpLikeClient::new("http://127.0.0.1:9");
        let slug = Slug::parse("offline").unwrap();

        assert_eq!(LikeClient::increment(&client, &slug, 2).await, IncrementOutcome::failed());
    }
}
