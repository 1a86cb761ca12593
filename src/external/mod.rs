pub mod brapi;
pub mod mock;
pub mod quote_provider;
