mod cli;
mod config;
mod error;
mod schema;
mod store;
mod upload;
mod web;

use std::sync::Arc;
use store::{PgStore, ReportStore};

fn run() -> error::Result<()> {
  let matches = cli::matches();
  let config = config::load(cli::config_path(&matches))?;

  // r2d2 pool, opened before the runtime starts
  let store = PgStore::connect(&config)?;

  cli::load(&matches, &store)?;

  store.init_schema(false)?;
  log::info!("uploads in {}, served as {}{}", config.server.upload_dir, config.web.public_url, upload::ROUTE);

  web::init(config, Arc::new(store))
}

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,actix_web=debug")).init();

  if let Err(e) = run() {
    eprintln!("{}", error::display(&e));
    std::process::exit(1);
  }
}
