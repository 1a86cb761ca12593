use std::collections::HashMap;

use bigdecimal::BigDecimal;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::external::quote_provider::{Quote, QuoteProvider};
use crate::models::{AssetValuation, PortfolioValuation, Position};
use crate::services::position_service;

/// Value the owner's portfolio at current quotes: net position per ticker,
/// one batched quote fetch, quantity times last price per asset.
pub async fn portfolio_valuation(
    pool: &PgPool,
    provider: &dyn QuoteProvider,
    user_id: Uuid,
) -> Result<PortfolioValuation, AppError> {
    let positions = position_service::net_positions(pool, user_id).await?;

    // Sold-out (or edit-oversold) tickers carry no value; don't quote them.
    let held: Vec<Position> = positions
        .into_iter()
        .filter(|p| p.quantity > BigDecimal::from(0))
        .collect();

    let tickers: Vec<String> = held.iter().map(|p| p.ticker.clone()).collect();
    let quotes = provider.fetch_quotes(&tickers).await?;

    Ok(build_valuation(held, quotes))
}

fn build_valuation(positions: Vec<Position>, quotes: Vec<Quote>) -> PortfolioValuation {
    let prices: HashMap<String, BigDecimal> =
        quotes.into_iter().map(|q| (q.ticker, q.price)).collect();

    let mut assets = Vec::with_capacity(positions.len());
    let mut total = BigDecimal::from(0);
    for position in positions {
        let Some(price) = prices.get(&position.ticker) else {
            warn!(
                "no quote for held asset {}, leaving it out of the valuation",
                position.ticker
            );
            continue;
        };
        let market_value = &position.quantity * price;
        total += market_value.clone();
        assets.push(AssetValuation {
            ticker: position.ticker,
            quantity: position.quantity,
            last_price: price.clone(),
            market_value,
        });
    }

    PortfolioValuation { assets, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(ticker: &str, quantity: i64) -> Position {
        Position {
            ticker: ticker.to_string(),
            quantity: BigDecimal::from(quantity),
        }
    }

    fn quote(ticker: &str, price: &str) -> Quote {
        Quote {
            ticker: ticker.to_string(),
            price: price.parse().unwrap(),
        }
    }

    #[test]
    fn values_each_position_and_totals_them() {
        let valuation = build_valuation(
            vec![position("PETR4", 10), position("VALE3", 5)],
            vec![quote("PETR4", "38.50"), quote("VALE3", "61.20")],
        );

        assert_eq!(valuation.assets.len(), 2);
        assert_eq!(valuation.assets[0].market_value, "385.00".parse().unwrap());
        assert_eq!(valuation.assets[1].market_value, "306.00".parse().unwrap());
        assert_eq!(valuation.total, "691.00".parse().unwrap());
    }

    #[test]
    fn positions_without_a_quote_are_left_out() {
        let valuation = build_valuation(
            vec![position("PETR4", 10), position("XXXX3", 7)],
            vec![quote("PETR4", "38.50")],
        );

        assert_eq!(valuation.assets.len(), 1);
        assert_eq!(valuation.assets[0].ticker, "PETR4");
        assert_eq!(valuation.total, "385.00".parse().unwrap());
    }

    #[test]
    fn empty_portfolio_values_to_zero() {
        let valuation = build_valuation(Vec::new(), Vec::new());
        assert!(valuation.assets.is_empty());
        assert_eq!(valuation.total, BigDecimal::from(0));
    }

    #[test]
    fn fractional_quantities_price_exactly() {
        let valuation = build_valuation(
            vec![Position {
                ticker: "PETR4".to_string(),
                quantity: "2.5".parse().unwrap(),
            }],
            vec![quote("PETR4", "38.50")],
        );
        assert_eq!(valuation.total, "96.25".parse().unwrap());
    }
}
