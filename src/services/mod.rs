pub mod position_service;
pub mod sell_locks;
pub mod transaction_service;
pub mod valuation_service;
