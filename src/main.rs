use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use car_rental_api::{
    config::{AppConfig, StorageBackend},
    db::{memory::MemoryStore, mongo, repository::RentalStore},
    routes,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env();

    match config.storage {
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage; data is lost on shutdown");
            serve(config, MemoryStore::new()).await
        }
        StorageBackend::Mongo => {
            let uri = config.mongo_uri.clone().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "MONGODB_URI must be set")
            })?;
            let client = mongo::create_mongo_client(&uri)
                .await
                .map_err(io::Error::other)?;
            let store = mongo::MongoStore::new(client.database(&config.database_name));
            log::info!("MongoDB connection established");
            serve(config, store).await
        }
    }
}

async fn serve<S: RentalStore>(config: AppConfig, store: S) -> io::Result<()> {
    let store = web::Data::new(store);
    let settings = web::Data::new(config.clone());

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(store.clone())
            .app_data(settings.clone())
            .configure(routes::configure::<S>)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
