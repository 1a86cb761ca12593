use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

// A buy or sell of a B3 asset as reported by the user. Rows are the source
// of truth for positions; nothing else is persisted about holdings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub asset_name: String,
    pub ticker: String,
    pub side: String, // Converted to/from Side
    pub price: BigDecimal,
    pub quantity: BigDecimal,
    pub executed_at: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// Request body shared by the buy and sell endpoints. The side is fixed by
// the endpoint, never by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransaction {
    pub asset_name: String,
    pub ticker: String,
    pub price: BigDecimal,
    pub quantity: BigDecimal,
    pub executed_at: NaiveDate,
}

// Partial update of a historical record. Side and owner are deliberately
// absent: action and ownership never change after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTransaction {
    pub ticker: Option<String>,
    pub price: Option<BigDecimal>,
    pub quantity: Option<BigDecimal>,
}

impl UpdateTransaction {
    pub fn is_empty(&self) -> bool {
        self.ticker.is_none() && self.price.is_none() && self.quantity.is_none()
    }
}

impl Transaction {
    pub fn new(user_id: uuid::Uuid, side: Side, data: CreateTransaction) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            user_id,
            asset_name: data.asset_name,
            ticker: data.ticker,
            side: side.as_str().to_string(),
            price: data.price,
            quantity: data.quantity,
            executed_at: data.executed_at,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_create() -> CreateTransaction {
        CreateTransaction {
            asset_name: "Petrobras".to_string(),
            ticker: "PETR4".to_string(),
            price: "38.52".parse().unwrap(),
            quantity: BigDecimal::from(10),
            executed_at: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    #[test]
    fn new_transaction_stores_side_as_text() {
        let t = Transaction::new(uuid::Uuid::new_v4(), Side::Buy, sample_create());
        assert_eq!(t.side, "BUY");
        let t = Transaction::new(uuid::Uuid::new_v4(), Side::Sell, sample_create());
        assert_eq!(t.side, "SELL");
    }

    #[test]
    fn update_with_no_fields_is_empty() {
        assert!(UpdateTransaction::default().is_empty());
        let update = UpdateTransaction {
            price: Some(BigDecimal::from(40)),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn update_deserializes_missing_fields_as_none() {
        let update: UpdateTransaction = serde_json::from_str(r#"{"price": "41.10"}"#).unwrap();
        assert_eq!(update.price, Some("41.10".parse().unwrap()));
        assert!(update.ticker.is_none());
        assert!(update.quantity.is_none());
    }
}
