//! Data provider trait and structured error types.
//!
//! The `DataProvider` trait abstracts over market data sources (Yahoo
//! Finance, synthetic random walks) so callers can swap implementations and
//! tests never need the network. Period and interval are coarse tokens
//! ("6mo", "1y", "1d") resolved by the provider, not by the core.

use thiserror::Error;

use crate::domain::Bar;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("ticker not found: {ticker}")]
    TickerNotFound { ticker: String },

    #[error("provider returned no bars for '{ticker}'")]
    EmptyResponse { ticker: String },

    #[error("unsupported period token: {0}")]
    UnsupportedPeriod(String),
}

/// Trait for market data providers.
///
/// Implementations return daily bars sorted ascending by date with at least
/// the close populated. Retries, if any, live inside the provider; the core
/// never retries.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch bars for a ticker over a coarse period token (e.g. "1y") at
    /// the given interval (e.g. "1d").
    fn fetch(&self, ticker: &str, period: &str, interval: &str) -> Result<Vec<Bar>, DataError>;
}

/// Approximate number of daily bars covered by a period token.
///
/// Shared by providers that have to resolve tokens locally (the synthetic
/// provider); the Yahoo provider passes the token through to the API.
pub fn bars_for_period(period: &str) -> Result<usize, DataError> {
    match period {
        "1mo" => Ok(21),
        "3mo" => Ok(63),
        "6mo" => Ok(126),
        "1y" => Ok(252),
        "2y" => Ok(504),
        "5y" => Ok(1260),
        "10y" => Ok(2520),
        "max" => Ok(5040),
        other => Err(DataError::UnsupportedPeriod(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_tokens_resolve() {
        assert_eq!(bars_for_period("6mo").unwrap(), 126);
        assert_eq!(bars_for_period("1y").unwrap(), 252);
        assert_eq!(bars_for_period("2y").unwrap(), 504);
    }

    #[test]
    fn unknown_period_is_an_error() {
        assert!(matches!(
            bars_for_period("fortnight"),
            Err(DataError::UnsupportedPeriod(_))
        ));
    }
}
