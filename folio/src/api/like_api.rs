use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::api::types::Response;
use crate::app::App;
use crate::constants::MAX_BULK_SLUGS;
use crate::errors::FolioError;
use crate::models::like_counter::{LikeCount, LikeRequest, LikeUpdate};
use crate::models::slug::Slug;

#[derive(Deserialize)]
pub struct BulkLikesQuery {
    pub slugs: String,
}

impl BulkLikesQuery {
    fn parse_slugs(&self) -> Result<Vec<Slug>, FolioError> {
        let slugs = self
            .slugs
            .split(',')
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
            .map(Slug::parse)
            .collect::<Result<Vec<Slug>, FolioError>>()?;

        if slugs.len() > MAX_BULK_SLUGS {
            return Err(FolioError::ValidationError((
                "slugs".to_string(),
                format!("at most {} slugs per request", MAX_BULK_SLUGS),
            )));
        }

        Ok(slugs)
    }
}

/// An empty body is a single like.
fn parse_like_request(body: &[u8]) -> Result<LikeRequest, FolioError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LikeRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| FolioError::ValidationError(("body".to_string(), e.to_string())))
}

#[get("")]
pub async fn get_like_counts(app: web::Data<App>, query: web::Query<BulkLikesQuery>) -> Response {
    let slugs = query.parse_slugs()?;

    for slug in &slugs {
        app.catalog.validate(slug)?;
    }

    let counts = app.like_counter.read_many(&slugs).await;

    Ok(HttpResponse::Ok().json(counts))
}

#[get("/{slug}")]
pub async fn get_like_count(app: web::Data<App>, slug: web::Path<String>) -> Response {
    let slug = Slug::parse(&slug)?;
    app.catalog.validate(&slug)?;

    let likes = app.like_counter.read(&slug).await;

    Ok(HttpResponse::Ok().json(LikeCount { slug, likes }))
}

/// Store failures are not errors here: the response carries `success: false` and the
/// client reverts its optimistic count.
#[post("/{slug}")]
pub async fn create_like(
    app: web::Data<App>,
    slug: web::Path<String>,
    body: web::Bytes,
) -> Response {
    let slug = Slug::parse(&slug)?;
    app.catalog.validate(&slug)?;

    let like = parse_like_request(&body)?;
    if like.count < 1 {
        return Err(FolioError::ValidationError((
            "count".to_string(),
            "must be a positive integer".to_string(),
        )));
    }

    let outcome = app.like_counter.increment(&slug, like.count).await;

    Ok(HttpResponse::Ok().json(LikeUpdate::new(slug, outcome)))
}
