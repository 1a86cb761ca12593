use async_trait::async_trait;
use bigdecimal::BigDecimal;
use thiserror::Error;

/// Latest market price for one ticker, as reported by a quote source.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub ticker: String,
    pub price: BigDecimal,
}

#[derive(Debug, Error)]
pub enum QuoteProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

/// Source of current B3 quotes. Providers may return fewer quotes than
/// requested when a ticker is unknown to them; callers decide what a missing
/// quote means.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quotes(&self, tickers: &[String]) -> Result<Vec<Quote>, QuoteProviderError>;
}
