use actix_web::{get, web, HttpResponse};

use crate::api::types::Response;
use crate::app::App;
use crate::models::article::ArticleWithLikes;

#[get("")]
pub async fn get_articles(app: web::Data<App>) -> Response {
    let counts = app.like_counter.read_many(&app.catalog.slugs()).await;

    let articles: Vec<ArticleWithLikes> = app
        .catalog
        .articles()
        .iter()
        .zip(counts)
        .map(|(article, count)| ArticleWithLikes {
            article: article.clone(),
            likes: count.likes,
        })
        .collect();

    Ok(HttpResponse::Ok().json(articles))
}

#[cfg(test)]
mod tests {
    use crate::api::routes;
    use crate::app::App;
    use actix_web::{test, web, App as ActixWebApp};
    use serde_json::Value;

    #[actix_web::test]
    async fn lists_articles_newest_first_with_likes() {
        let app = App::for_tests(
            r#"
            [[articles]]
            title = "Rewriting my website from scratch"
            caption = "It was time to add a blog!"
            published_date = "2025-11-16"
            slug = "rewriting-my-website-from-scratch"

            [[articles]]
            title = "Orchestrating AI Agents to Create Memes"
            caption = "Building an agent orchestrator system"
            published_date = "2025-12-05"
            slug = "orchestrating-ai-agents-to-create-memes"
            "#,
        )
        .await;
        let service = test::init_service(
            ActixWebApp::new()
                .app_data(web::Data::new(app))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/likes/rewriting-my-website-from-scratch")
            .to_request();
        test::call_service(&service, req).await;

        let req = test::TestRequest::get().uri("/articles").to_request();
        let articles: Vec<Value> = test::call_and_read_body_json(&service, req).await;

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0]["slug"], "orchestrating-ai-agents-to-create-memes");
        assert_eq!(articles[0]["likes"], 0);
        assert_eq!(articles[1]["publishedDate"], "2025-11-16");
        assert_eq!(articles[1]["likes"], 1);
    }

    #[actix_web::test]
    async fn empty_catalog_lists_nothing() {
        let service = test::init_service(
            ActixWebApp::new()
                .app_data(web::Data::new(App::for_tests("").await))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/articles").to_request();
        let articles: Vec<Value> = test::call_and_read_body_json(&service, req).await;

        assert!(articles.is_empty());
    }
}
