//! Expense domain errors

use thiserror::Error;

/// Errors raised while validating ledger input at the boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    /// Amount is blank, not a number, or negative
    #[error("Invalid amount for {field}: {value:?}")]
    InvalidAmount {
        field: String,
        value: String,
    },

    /// Category is not one of the known categories
    #[error("Invalid category: {0}. Must be one of: rent, groceries, utilities, internet, supplies, maintenance, other")]
    InvalidCategory(String),

    /// Any other validation failure
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ExpenseError {
    pub fn invalid_amount(field: impl Into<String>, value: impl Into<String>) -> Self {
        ExpenseError::InvalidAmount {
            field: field.into(),
            value: value.into(),
        }
    }
}
