pub mod listing_queries;
pub mod schema;
pub mod transaction_queries;
