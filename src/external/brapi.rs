use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::Deserialize;
use tracing::warn;

use crate::external::quote_provider::{Quote, QuoteProvider, QuoteProviderError};

// brapi.dev caps how many tickers one request may carry; bigger portfolios
// are fetched as concurrent chunks.
const CHUNK_SIZE: usize = 10;

pub struct BrapiProvider {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BrapiProvider {
    pub fn from_env() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://brapi.dev".to_string(),
            token: std::env::var("BRAPI_TOKEN").ok(),
        }
    }

    async fn fetch_chunk(&self, tickers: &[String]) -> Result<Vec<Quote>, QuoteProviderError> {
        let url = format!("{}/api/quote/{}", self.base_url, tickers.join(","));

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuoteProviderError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(QuoteProviderError::BadResponse(format!(
                "brapi returned status {}",
                resp.status()
            )));
        }

        let body = resp
            .json::<BrapiQuoteResponse>()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        parse_quotes(body)
    }
}

#[derive(Debug, Deserialize)]
struct BrapiQuoteResponse {
    results: Option<Vec<BrapiQuote>>,

    // Error payloads carry a human-readable message instead of results:
    // { "error": true, "message": "Não encontramos a ação ..." }
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BrapiQuote {
    symbol: String,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

fn parse_quotes(body: BrapiQuoteResponse) -> Result<Vec<Quote>, QuoteProviderError> {
    let results = match body.results {
        Some(results) => results,
        None => {
            let message = body.message.unwrap_or_else(|| "missing results".to_string());
            return Err(QuoteProviderError::BadResponse(message));
        }
    };

    let mut quotes = Vec::with_capacity(results.len());
    for raw in results {
        let Some(price) = raw.regular_market_price else {
            warn!("brapi quote for {} has no market price, skipping", raw.symbol);
            continue;
        };
        // Round-trip through the decimal string form so the stored price is
        // the printed price, not the nearest binary float.
        let price = price
            .to_string()
            .parse::<BigDecimal>()
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;
        quotes.push(Quote {
            ticker: raw.symbol,
            price,
        });
    }
    Ok(quotes)
}

#[async_trait]
impl QuoteProvider for BrapiProvider {
    async fn fetch_quotes(&self, tickers: &[String]) -> Result<Vec<Quote>, QuoteProviderError> {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }

        let chunks = tickers
            .chunks(CHUNK_SIZE)
            .map(|chunk| self.fetch_chunk(chunk));
        let fetched = futures::future::try_join_all(chunks).await?;

        Ok(fetched.into_iter().flatten().collect())
    }
}
