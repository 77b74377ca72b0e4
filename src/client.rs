use std::path::Path;

use log::{error, info, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::config::ClientConfig;
use crate::deadline::Deadline;
use crate::error::{Error, Result};

/// The part of the server's answer the client cares about.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub bid: String,
}

/// Fetches the quote and writes it to the output file, all of the network
/// part bounded by `config.timeout`.
pub async fn run(http: &Client, config: &ClientConfig) -> Result<Quote> {
    let deadline = Deadline::after(config.timeout);
    let quote = fetch_quote(http, &config.server_url, deadline).await?;
    save_quote(&config.output_file, &quote).await?;

    Ok(quote)
}

pub async fn fetch_quote(http: &Client, url: &str, deadline: Deadline) -> Result<Quote> {
    let quote = deadline.run(request_quote(http, url, deadline)).await?;
    quote.ok_or(Error::EmptyBody)
}

/// `Ok(None)` when the server answered a JSON `null`.
async fn request_quote(http: &Client, url: &str, deadline: Deadline) -> Result<Option<Quote>> {
    let resp = http.get(url).timeout(deadline.remaining()).send().await?;

    match resp.status() {
        StatusCode::OK => {}
        StatusCode::REQUEST_TIMEOUT => return Err(Error::ServerTimeout),
        status => return Err(Error::Status(status)),
    }

    let text = resp.text().await?;
    Ok(serde_json::from_str(&text)?)
}

pub fn render(quote: &Quote) -> String {
    format!("Dólar: {}\n", quote.bid)
}

/// Replaces the contents of `path` with the rendered quote.
pub async fn save_quote(path: impl AsRef<Path>, quote: &Quote) -> Result<()> {
    let content = render(quote);
    info!("Saving exchange rate to file: {}", content.trim_end());

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o644);

    let mut file = options.open(path).await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;

    Ok(())
}

/// One log line per failure class; nothing else is reported to the user.
pub fn log_failure(err: &Error) {
    match err {
        err if err.is_timeout() => warn!("Timeout when getting exchange rate from server: {err}"),
        Error::EmptyBody => warn!("Received empty exchange rate data"),
        Error::Io(err) => error!("Error saving exchange rate to file: {err}"),
        err => error!("Error getting exchange rate: {err}"),
    }
}
