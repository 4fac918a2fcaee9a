use crate::{config, error, store::ReportStore, upload};
use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
#[cfg(not(target_os = "linux"))]
use error_chain::bail;
use std::sync::Arc;

mod form;
mod reports;

pub type Store = web::Data<dyn ReportStore>;
pub type Config = web::Data<config::Config>;

/*
 * wrapper over actix_web::web::block
 * moves the store handle onto the blocking pool and lends it to the inner closure
 */
pub async fn block<F, I>(store: Store, f: F) -> error::Result<I>
where
  F: FnOnce(&dyn ReportStore) -> error::Result<I> + Send + 'static,
  I: Send + 'static,
{
  web::block(move || f(store.get_ref())).await?
}

/// Routes shared by the server and the tests; app data is registered by the caller.
pub fn configure(cfg: &mut web::ServiceConfig, config: &config::Config) {
  cfg
    .service(reports::sv_root)
    .service(
      web::scope("/reportes")
        .wrap(Cors::permissive())
        .service(
          web::resource("")
            .route(web::get().to(reports::sv_list))
            .route(web::post().to(reports::sv_create)),
        )
        .service(reports::sv_delete),
    )
    .service(actix_files::Files::new(upload::ROUTE, &config.server.upload_dir))
    .default_service(web::to(default_service));
}

// 405 comes from the resources themselves; anything that matched none is 404
async fn default_service() -> Result<HttpResponse> {
  Ok(HttpResponse::NotFound().finish())
}

pub fn init(config: config::Config, store: Arc<dyn ReportStore>) -> error::Result<()> {
  actix_rt::System::new().block_on(serve(config, store))
}

async fn serve(config: config::Config, store: Arc<dyn ReportStore>) -> error::Result<()> {
  std::fs::create_dir_all(&config.server.upload_dir)?;

  let store: Store = web::Data::from(store);
  let bind_addr = config.server.bind_addr.clone();
  let config: Config = web::Data::new(config);

  let server = HttpServer::new(move || {
    App::new()
      .app_data(store.clone())
      .app_data(config.clone())
      .wrap(middleware::Logger::default())
      .configure(|cfg| configure(cfg, &config))
  });

  log::info!("listening on {}", bind_addr);
  if bind_addr.starts_with("unix:/") {
    #[cfg(target_os = "linux")]
    {
      server.bind_uds(bind_addr.trim_start_matches("unix:"))?.run().await?;
    }
    #[cfg(not(target_os = "linux"))]
    bail!("Unix sockets are not available for this target");
  } else {
    server.bind(bind_addr)?.run().await?;
  }
  Ok(())
}
