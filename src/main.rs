use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use rental_ranker::config::{LoggingSettings, Settings};
use rental_ranker::routes::{self, AppState};
use rental_ranker::services::PropertyStore;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    info!("Starting Rental Ranker service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let store = Arc::new(PropertyStore::new());

    if let Some(seed_path) = &settings.store.seed_path {
        match PropertyStore::load_seed(seed_path).await {
            Ok(properties) => {
                let loaded = store.upsert_many(properties).await;
                info!("Seeded store with {} properties from {}", loaded, seed_path);
            }
            Err(e) => {
                warn!("Failed to seed store from {} ({}), starting empty", seed_path, e);
            }
        }
    }

    let app_state = AppState {
        store,
        default_limit: settings.ranking.default_limit,
        max_limit: settings.ranking.max_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
