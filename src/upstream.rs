use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use log::debug;
use reqwest::Client;

use crate::deadline::Deadline;
use crate::error::{Error, Result};
use crate::exchange_rate::ExchangeRate;

pub const DEFAULT_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
pub const DEFAULT_PAIR: &str = "USDBRL";

/// Where the server gets the current quote from.
pub trait RateSource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        deadline: Deadline,
    ) -> Pin<Box<dyn Future<Output = Result<ExchangeRate>> + Send + 'a>>;
}

/// The upstream JSON API: `GET <url>` answers an object keyed by pair name,
/// e.g. `{"USDBRL": {...}}`.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    url: String,
    pair: String,
}

impl UpstreamClient {
    pub fn new(http: Client, url: impl Into<String>, pair: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            pair: pair.into(),
        }
    }

    async fn fetch_quote(&self, deadline: Deadline) -> Result<ExchangeRate> {
        debug!("Fetching {} from {}", self.pair, self.url);
        let text = self.load_json(deadline).await?;
        parse_quote(&text, &self.pair)
    }

    async fn load_json(&self, deadline: Deadline) -> Result<String> {
        let resp = self
            .http
            .get(&self.url)
            .timeout(deadline.remaining())
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Error::Status(resp.status()));
        }

        Ok(resp.text().await?)
    }
}

impl RateSource for UpstreamClient {
    fn fetch<'a>(
        &'a self,
        deadline: Deadline,
    ) -> Pin<Box<dyn Future<Output = Result<ExchangeRate>> + Send + 'a>> {
        Box::pin(deadline.run(self.fetch_quote(deadline)))
    }
}

/// Picks `pair` out of an upstream payload. A payload without that key is an
/// error, not an empty quote.
pub fn parse_quote(text: &str, pair: &str) -> Result<ExchangeRate> {
    let mut quotes: HashMap<String, serde_json::Value> = serde_json::from_str(text)?;
    let quote = quotes
        .remove(pair)
        .ok_or_else(|| Error::MissingPair(pair.to_string()))?;

    Ok(serde_json::from_value(quote)?)
}
