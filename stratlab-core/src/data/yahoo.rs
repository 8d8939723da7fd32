//! Yahoo Finance data provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API, passing the coarse
//! period token straight through as the `range` query parameter. Handles
//! retries with exponential backoff and response parsing.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; the synthetic provider is the fallback when it is unavailable.

use std::time::Duration;

use serde::Deserialize;

use super::provider::{DataError, DataProvider};
use crate::domain::{dates_strictly_increasing, Bar};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    fn chart_url(ticker: &str, period: &str, interval: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?range={period}&interval={interval}"
        )
    }

    /// Parse the chart API response into sorted bars.
    fn parse_response(ticker: &str, resp: ChartResponse) -> Result<Vec<Bar>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::TickerNotFound {
                        ticker: ticker.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormatChanged("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote block".into()))?;

        let n = timestamps.len();
        if quote.close.len() != n {
            return Err(DataError::ResponseFormatChanged(format!(
                "timestamp/close length mismatch: {n} vs {}",
                quote.close.len()
            )));
        }

        let mut bars = Vec::with_capacity(n);
        for i in 0..n {
            // Rows with a null close are provider gaps; skip them.
            let close = match quote.close[i] {
                Some(c) => c,
                None => continue,
            };
            let date = chrono::DateTime::from_timestamp(timestamps[i], 0)
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("bad timestamp {}", timestamps[i]))
                })?
                .date_naive();

            bars.push(Bar {
                date,
                open: quote.open[i].unwrap_or(close),
                high: quote.high[i].unwrap_or(close),
                low: quote.low[i].unwrap_or(close),
                close,
                volume: quote.volume[i].unwrap_or(0),
            });
        }

        if bars.is_empty() {
            return Err(DataError::EmptyResponse {
                ticker: ticker.to_string(),
            });
        }
        if !dates_strictly_increasing(&bars) {
            bars.sort_by_key(|b| b.date);
            bars.dedup_by_key(|b| b.date);
        }

        Ok(bars)
    }

    fn fetch_once(&self, ticker: &str, period: &str, interval: &str) -> Result<Vec<Bar>, DataError> {
        let url = Self::chart_url(ticker, period, interval);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        if response.status().as_u16() == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited { retry_after_secs });
        }

        let parsed: ChartResponse = response
            .json()
            .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))?;
        Self::parse_response(ticker, parsed)
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, ticker: &str, period: &str, interval: &str) -> Result<Vec<Bar>, DataError> {
        let mut delay = self.base_delay;
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            match self.fetch_once(ticker, period, interval) {
                Ok(bars) => return Ok(bars),
                // Retry transient failures only; parse and not-found errors
                // will not improve on a second attempt.
                Err(e @ (DataError::NetworkUnreachable(_) | DataError::RateLimited { .. })) => {
                    last_err = Some(e);
                    if attempt < self.max_retries {
                        std::thread::sleep(delay);
                        delay *= 2;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.expect("retry loop always records an error before falling through"))
    }
}
