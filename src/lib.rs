//! Backend for tracking buy and sell transactions in B3-listed assets.
//!
//! Positions are derived from the transaction history rather than stored:
//! a sale is only admitted when the accumulated bought quantity minus the
//! accumulated sold quantity covers it. Portfolio valuation prices the
//! derived positions with quotes from an external provider.

pub mod app;
pub mod auth;
pub mod db;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
