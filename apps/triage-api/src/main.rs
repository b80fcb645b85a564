use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triage_api::app;
use triage_api::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    info!(?config, "starting triage service");

    let pool = common_db::init_db_pool(&config.db)
        .await
        .context("database initialization failed")?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid bind address")?;

    info!("listening on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app(pool).into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
