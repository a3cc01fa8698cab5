use dotenvy::dotenv;
use restaurant_pos::config::{Config, StorageBackend};
use restaurant_pos::{build_server, AppState, Repositories, Storage};

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(startup_error)?;

    let (repos, storage) = match (&config.backend, &config.database) {
        (StorageBackend::Postgres, Some(settings)) => {
            let storage = Storage::open(settings).map_err(startup_error)?;
            storage.run_migrations().map_err(startup_error)?;
            (Repositories::postgres(&storage), Some(storage))
        }
        (StorageBackend::Postgres, None) => {
            return Err(startup_error("DATABASE_URL must be set"));
        }
        (StorageBackend::Memory, _) => {
            log::warn!("Using the in-memory backend; nothing is persisted");
            (Repositories::in_memory(), None)
        }
    };

    if config.verify_order_totals {
        log::info!("Order totals are verified against menu prices");
    }

    let state = AppState::new(repos, config.verify_order_totals);

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    log::info!(
        "Swagger UI at http://{}:{}/swagger-ui/",
        config.host,
        config.port
    );

    let result = build_server(state, &config.host, config.port)?.await;

    if let Some(storage) = storage {
        storage.close();
    }
    result
}
