use anyhow::Result;
use cotacao::client;
use cotacao::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::from_env()?;
    let http = reqwest::Client::new();

    if let Err(err) = client::run(&http, &config).await {
        client::log_failure(&err);
    }

    Ok(())
}
