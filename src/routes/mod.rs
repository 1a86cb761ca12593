pub(crate) mod health;
pub(crate) mod listings;
pub(crate) mod portfolio;
pub(crate) mod positions;
pub(crate) mod transactions;
