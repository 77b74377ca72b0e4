use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single quote as published by the upstream API. Values are kept as the
/// strings upstream sent so they round-trip without loss.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ExchangeRate {
    pub code: String,
    #[serde(rename = "codein")]
    pub code_in: String,
    pub name: String,
    pub high: String,
    pub low: String,
    #[serde(rename = "varBid")]
    pub var_bid: String,
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    pub bid: String,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}

/// A quote together with the id it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRateRecord {
    pub id: Uuid,
    pub rate: ExchangeRate,
}

impl ExchangeRateRecord {
    pub fn new(rate: ExchangeRate) -> Self {
        Self {
            id: Uuid::new_v4(),
            rate,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample() -> ExchangeRate {
    ExchangeRate {
        code: "USD".into(),
        code_in: "BRL".into(),
        name: "Dólar Americano/Real Brasileiro".into(),
        high: "5.4521".into(),
        low: "5.4012".into(),
        var_bid: "0.0123".into(),
        pct_change: "0.23".into(),
        bid: "5.43".into(),
        ask: "5.4312".into(),
        timestamp: "1718900000".into(),
        create_date: "2024-06-20 13:33:20".into(),
    }
}
