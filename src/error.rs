use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// The deadline attached to the operation expired before it finished.
    #[error("deadline exceeded")]
    TimedOut,

    #[error("request failed: {0}")]
    Http(reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("exchange rate data not found for {0}")]
    MissingPair(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(
        "unexpected status code: {} - {}",
        .0.as_u16(),
        .0.canonical_reason().unwrap_or("Unknown")
    )]
    Status(StatusCode),

    /// The rate server answered 408: one of its own deadlines expired.
    #[error("timeout when getting the exchange rate")]
    ServerTimeout,

    #[error("exchange rate data is empty")]
    EmptyBody,

    #[error("failed to write to file: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Timeouts on either side of the wire, ours or the server's.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::TimedOut | Error::ServerTimeout)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::TimedOut
        } else {
            Error::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_carries_code_and_reason() {
        let err = Error::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "unexpected status code: 500 - Internal Server Error"
        );
    }

    #[test]
    fn only_deadline_variants_count_as_timeouts() {
        assert!(Error::TimedOut.is_timeout());
        assert!(Error::ServerTimeout.is_timeout());
        assert!(!Error::EmptyBody.is_timeout());
        assert!(!Error::MissingPair("USDBRL".into()).is_timeout());
    }
}
