//! Registro Server: persona and generic table CRUD over a hosted
//! relational data service.
//!
//! Main entry point that loads configuration, initializes logging and
//! starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use registro_core::config::AppConfig;
use registro_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the overlay for `REGISTRO_ENV` and
/// `REGISTRO__*` environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("REGISTRO_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting {} v{}", config.server.name, env!("CARGO_PKG_VERSION"));
    tracing::info!(
        store = %config.store.provider,
        resources = config.resources.len(),
        "Configuration loaded"
    );
    registro_api::run_server(config).await
}
