//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gamer_society::inbound::http::health::HealthState;
use gamer_society::middleware::ApiKey;
use gamer_society::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use gamer_society::settings::AppSettings;
use server::{ServerConfig, create_server};

async fn migrate(database_url: &str) -> Result<()> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "database migrations complete");
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_args(std::env::args_os())?;
    let database_url = settings.database_url()?;
    let api_key = ApiKey::new(settings.api_key()?)?;
    let bind_addr = settings.bind_addr()?;

    if settings.run_migrations {
        migrate(database_url).await?;
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(api_key, bind_addr, pool)
        .with_allowed_origins(settings.allowed_origins());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
