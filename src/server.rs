use std::sync::Arc;

use actix_web::{HttpResponse, web};
use log::{error, info, warn};

use crate::config::Timeouts;
use crate::deadline::Deadline;
use crate::error::Error;
use crate::exchange_rate::ExchangeRateRecord;
use crate::store::RateStore;
use crate::upstream::RateSource;

pub const RATE_PATH: &str = "/cotacao";

/// Everything the rate endpoint needs, built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RateSource>,
    pub store: Arc<dyn RateStore>,
    pub timeouts: Timeouts,
}

impl AppState {
    pub fn new(source: Arc<dyn RateSource>, store: Arc<dyn RateStore>, timeouts: Timeouts) -> Self {
        Self {
            source,
            store,
            timeouts,
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(RATE_PATH, web::get().to(exchange_rate));
}

async fn exchange_rate(state: web::Data<AppState>) -> HttpResponse {
    let timeouts = state.timeouts;
    let request_deadline = timeouts.request.map(Deadline::after);

    let fetch_deadline = Deadline::within(request_deadline, timeouts.upstream);
    let rate = match state.source.fetch(fetch_deadline).await {
        Ok(rate) => rate,
        Err(err) => {
            return failure(
                err,
                "Timeout when obtaining the exchange rate",
                "request timeout",
            );
        }
    };

    let record = ExchangeRateRecord::new(rate);
    info!("Generated id: {}", record.id);

    let db_deadline = Deadline::within(request_deadline, timeouts.database);
    if let Err(err) = state.store.insert(&record, db_deadline).await {
        return failure(
            err,
            "Timeout when saving exchange rate to database",
            "database timeout",
        );
    }

    info!("Request successful");
    HttpResponse::Ok().json(record.rate)
}

/// Deadline expiry becomes a 408 with `user_msg`; anything else is logged and
/// hidden behind a generic 500.
fn failure(err: Error, timeout_msg: &str, user_msg: &'static str) -> HttpResponse {
    match err {
        Error::TimedOut => {
            warn!("{timeout_msg}");
            HttpResponse::RequestTimeout()
                .content_type("text/plain; charset=utf-8")
                .body(user_msg)
        }
        err => {
            error!("Error: {err}");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Internal Server Error")
        }
    }
}
