use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use cotacao::config::ServerConfig;
use cotacao::server::{self, AppState};
use cotacao::store::PgRateStore;
use cotacao::upstream::UpstreamClient;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;

    let store = PgRateStore::connect(&config.database_url)
        .await
        .context("Database is unreachable")?;
    let source = UpstreamClient::new(
        reqwest::Client::new(),
        config.upstream_url.clone(),
        config.upstream_pair.clone(),
    );
    let state = web::Data::new(AppState::new(
        Arc::new(source),
        Arc::new(store),
        config.timeouts,
    ));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(server::configure)
    })
    .bind(&config.bind_addr)
    .with_context(|| format!("Can't bind {}", config.bind_addr))?;

    info!("Server is running on {}", config.bind_addr);
    server.run().await?;

    Ok(())
}
