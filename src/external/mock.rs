use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::external::quote_provider::{Quote, QuoteProvider, QuoteProviderError};

/// Offline quote source for development and tests: a per-ticker base price
/// with a small random jitter, no network involved.
pub struct MockQuoteProvider;

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn base_price(ticker: &str) -> f64 {
    // Stable per ticker so repeated valuations of the same portfolio look
    // sane in development.
    10.0 + (ticker.bytes().map(u64::from).sum::<u64>() % 90) as f64
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    async fn fetch_quotes(&self, tickers: &[String]) -> Result<Vec<Quote>, QuoteProviderError> {
        let mut quotes = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let price = base_price(ticker) * (1.0 + (rand::random::<f64>() - 0.5) * 0.02);
            let price = price
                .to_string()
                .parse::<BigDecimal>()
                .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;
            quotes.push(Quote {
                ticker: ticker.clone(),
                price,
            });
        }
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_a_positive_quote_per_ticker() {
        let provider = MockQuoteProvider::new();
        let tickers = vec!["PETR4".to_string(), "VALE3".to_string()];

        let quotes = provider.fetch_quotes(&tickers).await.unwrap();

        assert_eq!(quotes.len(), 2);
        for (quote, ticker) in quotes.iter().zip(&tickers) {
            assert_eq!(&quote.ticker, ticker);
            assert!(quote.price > BigDecimal::from(0));
        }
    }
}
