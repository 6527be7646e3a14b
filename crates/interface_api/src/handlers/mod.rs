//! Request handlers

pub mod health;
pub mod balances;
pub mod analytics;
