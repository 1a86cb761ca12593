use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// One row of the B3 listing catalog ("ativos B3"): company name plus trading
// ticker. Read-only reference data, served unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListedAsset {
    pub ticker: String,
    pub company_name: String,
}
