use std::future::Future;
use std::pin::Pin;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::deadline::Deadline;
use crate::error::Result;
use crate::exchange_rate::ExchangeRateRecord;

/// Append-only storage for fetched quotes.
pub trait RateStore: Send + Sync {
    fn insert<'a>(
        &'a self,
        record: &'a ExchangeRateRecord,
        deadline: Deadline,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

#[derive(Debug, Clone)]
pub struct PgRateStore {
    pool: PgPool,
}

impl PgRateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens the pool and makes sure the database answers.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().connect(database_url).await?;
        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self::new(pool))
    }

    async fn insert_row(&self, record: &ExchangeRateRecord) -> Result<()> {
        let rate = &record.rate;
        sqlx::query(
            "INSERT INTO exchange_rate \
             (id, code, code_in, name, high, low, var_bid, pct_change, bid, ask, timestamp, \
             create_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(record.id)
        .bind(&rate.code)
        .bind(&rate.code_in)
        .bind(&rate.name)
        .bind(&rate.high)
        .bind(&rate.low)
        .bind(&rate.var_bid)
        .bind(&rate.pct_change)
        .bind(&rate.bid)
        .bind(&rate.ask)
        .bind(&rate.timestamp)
        .bind(&rate.create_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl RateStore for PgRateStore {
    fn insert<'a>(
        &'a self,
        record: &'a ExchangeRateRecord,
        deadline: Deadline,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(deadline.run(self.insert_row(record)))
    }
}
