mod article_api;
mod like_api;
mod site_api;
pub mod types;

pub use article_api::*;
pub use like_api::*;
pub use site_api::*;

use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(get_settings)
        .service(
            web::scope("/likes")
                .service(get_like_counts)
                .service(get_like_count)
                .service(create_like),
        )
        .service(web::scope("/articles").service(get_articles));
}
