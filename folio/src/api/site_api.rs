use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::api::types::Response;
use crate::app::App;
use crate::config::LikeSettings;

#[get("/health")]
pub async fn health() -> Response {
    Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}

/// Settings the browser needs to batch and cap likes.
#[get("/settings")]
pub async fn get_settings(app: web::Data<App>) -> Response {
    Ok(HttpResponse::Ok().json(LikeSettings::from(&app.config.likes)))
}
