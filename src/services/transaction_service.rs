use std::sync::OnceLock;

use bigdecimal::BigDecimal;
use regex::Regex;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::transaction_queries;
use crate::errors::AppError;
use crate::models::{CreateTransaction, Side, Transaction, UpdateTransaction};
use crate::services::sell_locks::SellLocks;

static TICKER_SHAPE: OnceLock<Regex> = OnceLock::new();

// B3 tickers: a four-character root starting with a letter (roots like
// B3SA carry a digit), one or two series digits, optional fractional-market
// suffix (PETR4, SANB11, B3SA3, PETR4F).
fn ticker_shape() -> &'static Regex {
    TICKER_SHAPE.get_or_init(|| Regex::new("^[A-Z][A-Z0-9]{3}[0-9]{1,2}F?$").unwrap())
}

pub(crate) fn normalize_ticker(raw: &str) -> Result<String, AppError> {
    let ticker = raw.trim().to_uppercase();
    if !ticker_shape().is_match(&ticker) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid B3 ticker",
            raw
        )));
    }
    Ok(ticker)
}

fn validate_new_trade(data: &CreateTransaction) -> Result<String, AppError> {
    if data.asset_name.trim().is_empty() {
        return Err(AppError::Validation("asset name cannot be empty".into()));
    }
    if data.price <= BigDecimal::from(0) {
        return Err(AppError::Validation("price must be positive".into()));
    }
    if data.quantity <= BigDecimal::from(0) {
        return Err(AppError::Validation("quantity must be positive".into()));
    }
    normalize_ticker(&data.ticker)
}

fn validate_update(update: &mut UpdateTransaction) -> Result<(), AppError> {
    if update.is_empty() {
        return Err(AppError::Validation(
            "nothing to update: provide ticker, price or quantity".into(),
        ));
    }
    if let Some(ticker) = &update.ticker {
        update.ticker = Some(normalize_ticker(ticker)?);
    }
    if let Some(price) = &update.price {
        if *price <= BigDecimal::from(0) {
            return Err(AppError::Validation("price must be positive".into()));
        }
    }
    if let Some(quantity) = &update.quantity {
        if *quantity <= BigDecimal::from(0) {
            return Err(AppError::Validation("quantity must be positive".into()));
        }
    }
    Ok(())
}

pub async fn record_buy(
    pool: &PgPool,
    user_id: Uuid,
    mut data: CreateTransaction,
) -> Result<Transaction, AppError> {
    data.ticker = validate_new_trade(&data)?;

    let transaction = Transaction::new(user_id, Side::Buy, data);
    let created = transaction_queries::insert(pool, &transaction).await?;
    info!(
        "recorded buy of {} {} for user {}",
        created.quantity, created.ticker, user_id
    );
    Ok(created)
}

/// Admit and persist a sale, or reject it without writing anything.
///
/// The (owner, ticker) lock plus a single transaction around the aggregate
/// read and the insert keep concurrent sells from both seeing the same
/// pre-sale balance. Buys stay unserialized: a buy landing between the read
/// and the insert only grows the balance.
pub async fn record_sell(
    pool: &PgPool,
    locks: &SellLocks,
    user_id: Uuid,
    mut data: CreateTransaction,
) -> Result<Transaction, AppError> {
    data.ticker = validate_new_trade(&data)?;

    let _guard = locks.acquire(user_id, &data.ticker).await;

    let mut tx = pool.begin().await?;
    let holdings = transaction_queries::fetch_holdings(&mut *tx, user_id, &data.ticker).await?;
    let remaining = holdings.authorize_sale(&data.quantity)?;

    let transaction = Transaction::new(user_id, Side::Sell, data);
    let created = transaction_queries::insert(&mut *tx, &transaction).await?;
    tx.commit().await?;

    info!(
        "recorded sell of {} {} for user {}, {} remaining",
        created.quantity, created.ticker, user_id, remaining
    );
    Ok(created)
}

pub async fn history(pool: &PgPool, user_id: Uuid) -> Result<Vec<Transaction>, AppError> {
    let transactions = transaction_queries::fetch_history(pool, user_id).await?;
    Ok(transactions)
}

pub async fn edit(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    mut update: UpdateTransaction,
) -> Result<Transaction, AppError> {
    validate_update(&mut update)?;

    let updated = transaction_queries::update_fields(pool, id, user_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction {} not found", id)))?;
    Ok(updated)
}

pub async fn remove(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    match transaction_queries::delete(pool, id, user_id).await {
        Ok(0) => Err(AppError::NotFound(format!("Transaction {} not found", id))),
        Ok(_) => Ok(()),
        Err(e) => Err(AppError::Db(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trade(ticker: &str, price: &str, quantity: &str) -> CreateTransaction {
        CreateTransaction {
            asset_name: "Petrobras".to_string(),
            ticker: ticker.to_string(),
            price: price.parse().unwrap(),
            quantity: quantity.parse().unwrap(),
            executed_at: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    #[test]
    fn tickers_are_uppercased_and_shape_checked() {
        assert_eq!(normalize_ticker("petr4").unwrap(), "PETR4");
        assert_eq!(normalize_ticker(" SANB11 ").unwrap(), "SANB11");
        assert_eq!(normalize_ticker("petr4f").unwrap(), "PETR4F");
        assert_eq!(normalize_ticker("b3sa3").unwrap(), "B3SA3");

        assert!(normalize_ticker("PETR").is_err());
        assert!(normalize_ticker("PETROBRAS").is_err());
        assert!(normalize_ticker("PETR456").is_err());
        assert!(normalize_ticker("1234").is_err());
        assert!(normalize_ticker("").is_err());
    }

    #[test]
    fn seeded_catalog_tickers_are_accepted() {
        // The catalog endpoint offers these to the trade form; rejecting one
        // of them at trade time would be self-contradictory.
        for &(ticker, company) in crate::db::schema::SEED_LISTINGS {
            assert_eq!(
                normalize_ticker(ticker).ok().as_deref(),
                Some(ticker),
                "seeded catalog ticker {} ({}) must validate",
                ticker,
                company
            );
        }
    }

    #[test]
    fn new_trades_need_positive_price_and_quantity() {
        assert!(validate_new_trade(&trade("PETR4", "38.52", "10")).is_ok());
        assert!(validate_new_trade(&trade("PETR4", "0", "10")).is_err());
        assert!(validate_new_trade(&trade("PETR4", "-1", "10")).is_err());
        assert!(validate_new_trade(&trade("PETR4", "38.52", "0")).is_err());
        assert!(validate_new_trade(&trade("PETR4", "38.52", "-3")).is_err());
    }

    #[test]
    fn new_trades_need_an_asset_name() {
        let mut data = trade("PETR4", "38.52", "10");
        data.asset_name = "   ".to_string();
        assert!(validate_new_trade(&data).is_err());
    }

    #[test]
    fn empty_update_is_rejected() {
        let mut update = UpdateTransaction::default();
        assert!(validate_update(&mut update).is_err());
    }

    #[test]
    fn update_normalizes_ticker_and_checks_signs() {
        let mut update = UpdateTransaction {
            ticker: Some("vale3".to_string()),
            price: Some("61.20".parse().unwrap()),
            quantity: None,
        };
        validate_update(&mut update).unwrap();
        assert_eq!(update.ticker.as_deref(), Some("VALE3"));

        let mut update = UpdateTransaction {
            ticker: None,
            price: None,
            quantity: Some(BigDecimal::from(-5)),
        };
        assert!(validate_update(&mut update).is_err());
    }
}
