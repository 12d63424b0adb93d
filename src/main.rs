//! Net Salary Engine HTTP service.
//!
//! Loads the tax-year configuration and serves the breakdown API.
//! `SALARY_ENGINE_CONFIG` selects the configuration directory and
//! `SALARY_ENGINE_ADDR` the listen address; `RUST_LOG` controls logging.

use salary_engine::api::{AppState, create_router};
use salary_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/it2024";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir =
        std::env::var("SALARY_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = std::env::var("SALARY_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        tax_year = config.tax_year().year,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Net salary engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
