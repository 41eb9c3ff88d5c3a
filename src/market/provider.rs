use chrono::NaiveDate;
use thiserror::Error;

use super::frame::PriceFrame;

/// Errors from the remote price-history source. All of them are recoverable
/// per request: the pipeline folds them into an error chart.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider error: {0}")]
    Api(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// A source of daily price history. One request per submission; no retry and
/// no caching — every submission re-fetches.
pub trait PriceProvider {
    /// Fetch daily rows for `ticker` with both endpoint dates inclusive.
    /// An unknown ticker or an empty range yields an empty frame, not an
    /// error.
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceFrame, FetchError>;
}
