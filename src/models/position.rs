use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Why a proposed sale was not admitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SellRejection {
    /// The owner has never bought this asset, so there is nothing to sell
    /// (even if stray SELL rows exist from administrative edits).
    #[error("no open position to sell")]
    NoPosition,
    #[error("requested quantity {requested} exceeds available position {available}")]
    Insufficient {
        requested: BigDecimal,
        available: BigDecimal,
    },
}

/// Aggregated BUY/SELL quantities for one (owner, ticker), as returned by the
/// holdings query. Sums are `None` exactly when SQL `SUM` over zero rows is
/// NULL, which is what distinguishes "never bought" from "bought and fully
/// sold".
#[derive(Debug, Clone, FromRow)]
pub struct Holdings {
    pub bought: Option<BigDecimal>,
    pub sold: Option<BigDecimal>,
}

impl Holdings {
    /// Net quantity currently held: sum of buys minus sum of sells. Can go
    /// negative after administrative quantity edits; sells against such a
    /// position are rejected by `authorize_sale`.
    pub fn available(&self) -> BigDecimal {
        let bought = self.bought.clone().unwrap_or_else(|| BigDecimal::from(0));
        let sold = self.sold.clone().unwrap_or_else(|| BigDecimal::from(0));
        bought - sold
    }

    /// Decide whether a sale of `requested` units is admissible against this
    /// snapshot and return the position that would remain.
    ///
    /// Callers must have validated `requested > 0` already; the rule only
    /// distinguishes "never bought" from "not enough left".
    pub fn authorize_sale(&self, requested: &BigDecimal) -> Result<BigDecimal, SellRejection> {
        if self.bought.is_none() {
            return Err(SellRejection::NoPosition);
        }
        let available = self.available();
        if *requested > available {
            return Err(SellRejection::Insufficient {
                requested: requested.clone(),
                available,
            });
        }
        Ok(available - requested)
    }
}

// Net quantity of one asset derived from transaction history. Never stored;
// recomputed from the transactions table on demand.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Position {
    pub ticker: String,
    pub quantity: BigDecimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdings(bought: Option<i64>, sold: Option<i64>) -> Holdings {
        Holdings {
            bought: bought.map(BigDecimal::from),
            sold: sold.map(BigDecimal::from),
        }
    }

    #[test]
    fn sale_without_any_buys_is_rejected() {
        let h = holdings(None, None);
        assert_eq!(
            h.authorize_sale(&BigDecimal::from(1)),
            Err(SellRejection::NoPosition)
        );
    }

    #[test]
    fn sale_with_only_sell_rows_is_still_no_position() {
        // Stray SELL rows without a single BUY (possible via edits) must not
        // unlock selling.
        let h = holdings(None, Some(5));
        assert_eq!(
            h.authorize_sale(&BigDecimal::from(1)),
            Err(SellRejection::NoPosition)
        );
    }

    #[test]
    fn sale_within_available_is_admitted() {
        let h = holdings(Some(15), Some(3));
        assert_eq!(h.available(), BigDecimal::from(12));
        assert_eq!(h.authorize_sale(&BigDecimal::from(5)), Ok(BigDecimal::from(7)));
    }

    #[test]
    fn sale_of_exactly_available_empties_the_position() {
        let h = holdings(Some(15), Some(3));
        assert_eq!(h.authorize_sale(&BigDecimal::from(12)), Ok(BigDecimal::from(0)));
    }

    #[test]
    fn sale_above_available_is_rejected_with_both_quantities() {
        let h = holdings(Some(15), Some(3));
        assert_eq!(
            h.authorize_sale(&BigDecimal::from(13)),
            Err(SellRejection::Insufficient {
                requested: BigDecimal::from(13),
                available: BigDecimal::from(12),
            })
        );
    }

    #[test]
    fn fully_sold_position_admits_nothing() {
        let h = holdings(Some(8), Some(8));
        assert_eq!(h.available(), BigDecimal::from(0));
        assert!(matches!(
            h.authorize_sale(&BigDecimal::from(1)),
            Err(SellRejection::Insufficient { .. })
        ));
    }

    #[test]
    fn oversold_position_admits_nothing() {
        // Quantity edits can push a position negative; any further sale must
        // be rejected, never "corrected".
        let h = holdings(Some(5), Some(9));
        assert_eq!(h.available(), BigDecimal::from(-4));
        assert!(matches!(
            h.authorize_sale(&BigDecimal::from(1)),
            Err(SellRejection::Insufficient { .. })
        ));
    }

    #[test]
    fn fractional_quantities_are_exact() {
        let h = Holdings {
            bought: Some("10.5".parse().unwrap()),
            sold: Some("0.25".parse().unwrap()),
        };
        assert_eq!(
            h.authorize_sale(&"10.25".parse().unwrap()),
            Ok(BigDecimal::from(0))
        );
    }

    #[test]
    fn available_is_stable_across_calls() {
        let h = holdings(Some(15), Some(3));
        assert_eq!(h.available(), h.available());
    }

    #[test]
    fn two_buys_one_sell_then_oversell() {
        // Buys of 10 and 5, one sell of 3 -> position 12; selling 13 is
        // rejected; selling 12 is accepted and empties the position.
        let h = holdings(Some(10 + 5), Some(3));
        assert_eq!(h.available(), BigDecimal::from(12));
        assert!(h.authorize_sale(&BigDecimal::from(13)).is_err());
        let remaining = h.authorize_sale(&BigDecimal::from(12)).unwrap();
        assert_eq!(remaining, BigDecimal::from(0));

        let after = holdings(Some(15), Some(3 + 12));
        assert_eq!(after.available(), BigDecimal::from(0));
    }
}
