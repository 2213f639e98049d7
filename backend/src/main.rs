use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};
use safetynet::config::{ServerConfig, JSON_LIMIT_BYTES};
use safetynet::services::{self, AppState};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    let store = safetynet::open_store(&config.database).map_err(|err| {
        error!("Failed to open store: {}", err);
        io::Error::other(err)
    })?;
    let state = web::Data::new(AppState::new(store));
    let variant = config.variant;

    info!("{} service running at {}", variant, config.url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(JSON_LIMIT_BYTES))
            .app_data(state.clone())
            .configure(services::configure(variant))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
