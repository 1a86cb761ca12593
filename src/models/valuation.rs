use bigdecimal::BigDecimal;
use serde::Serialize;

// Current market value of one held asset: net quantity priced at the latest
// quote.
#[derive(Debug, Clone, Serialize)]
pub struct AssetValuation {
    pub ticker: String,
    pub quantity: BigDecimal,
    pub last_price: BigDecimal,
    pub market_value: BigDecimal,
}

// The user's patrimônio: every priceable held asset plus the portfolio total.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioValuation {
    pub assets: Vec<AssetValuation>,
    pub total: BigDecimal,
}
