mod listing;
mod position;
mod transaction;
mod valuation;

pub use listing::ListedAsset;
pub use position::{Holdings, Position, SellRejection};
pub use transaction::{CreateTransaction, Side, Transaction, UpdateTransaction};
pub use valuation::{AssetValuation, PortfolioValuation};
