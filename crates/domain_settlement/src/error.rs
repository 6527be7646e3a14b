//! Settlement domain errors

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{ExpenseId, MemberId, MoneyError, PortError, TemporalError};

/// Which amount on a ledger record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    PaidAmount,
    OwedAmount,
}

impl fmt::Display for AmountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountField::PaidAmount => f.write_str("paid amount"),
            AmountField::OwedAmount => f.write_str("owed amount"),
        }
    }
}

/// Errors that can occur while computing balances, settlements or reports
#[derive(Debug, Error)]
pub enum SettlementError {
    /// A payment or share carries a missing or negative amount
    #[error("Invalid amount: {field} on expense {expense_id} is {}", describe(.value))]
    InvalidAmount {
        expense_id: ExpenseId,
        member_id: Option<MemberId>,
        field: AmountField,
        value: Option<Decimal>,
    },

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Period error: {0}")]
    Period(#[from] TemporalError),

    /// Failure reported by the ledger collaborator, passed through unchanged
    #[error(transparent)]
    Ledger(#[from] PortError),
}

fn describe(value: &Option<Decimal>) -> String {
    match value {
        Some(amount) => amount.to_string(),
        None => "missing".to_string(),
    }
}
