use actix_web::middleware::Logger;
use actix_web::{web, App as ActixWebApp, HttpServer};
use anyhow::Context;
use folio::api::routes;
use folio::app::App;
use folio::tasks::prune_read_cache_task;
use folio::utils::logger::{log_fatal, log_success};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            log_fatal(&e);
            return Err(e).context("Could not create app");
        }
    };
    app.init().await;

    let address = (app.bind_address().to_string(), app.port());

    // tasks
    let _prune_task = prune_read_cache_task(app.like_counter.clone());

    let app_web_data = web::Data::new(app);

    log_success(format!("Listening on {}:{}", address.0, address.1));

    HttpServer::new(move || {
        ActixWebApp::new()
            .wrap(Logger::new("%a %r %s %b %{Referer}i %{User-Agent}i %T"))
            .wrap(app_web_data.cors())
            .app_data(app_web_data.clone())
            .configure(routes)
    })
    .bind(&address)
    .with_context(|| format!("Could not bind to {}:{}", address.0, address.1))?
    .run()
    .await
    .context("Server stopped unexpectedly")?;

    Ok(())
}
