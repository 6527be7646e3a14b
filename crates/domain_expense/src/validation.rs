//! Boundary validation for ledger input
//!
//! Raw amounts arrive as text from forms and query strings. They are parsed
//! here, once, into `Decimal`; nothing downstream re-parses or coerces.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ExpenseError;
use crate::expense::Expense;

/// Parses a non-negative decimal amount
///
/// # Errors
///
/// `ExpenseError::InvalidAmount` when the input is blank, not a plain decimal
/// number, or negative.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, ExpenseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExpenseError::invalid_amount(field, raw));
    }

    let amount = Decimal::from_str(trimmed)
        .map_err(|_| ExpenseError::invalid_amount(field, raw))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ExpenseError::invalid_amount(field, raw));
    }

    Ok(amount)
}

/// Checks a new expense the way the record-keeping layer does before storing it
///
/// - the title must not be blank
/// - at least one payment, each with an amount
/// - every share carries an amount
/// - no negative amounts
/// - the payments must add up to more than zero
pub fn validate_expense(expense: &Expense) -> Result<(), ExpenseError> {
    if expense.title.trim().is_empty() {
        return Err(ExpenseError::Validation("Title is required".to_string()));
    }

    if expense.payments.is_empty() {
        return Err(ExpenseError::Validation(
            "At least one payment is required".to_string(),
        ));
    }

    let mut total_paid = Decimal::ZERO;
    for payment in &expense.payments {
        let amount = payment
            .paid_amount
            .ok_or_else(|| ExpenseError::invalid_amount("paid_amount", ""))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ExpenseError::invalid_amount("paid_amount", amount.to_string()));
        }
        total_paid += amount;
    }

    for share in &expense.shares {
        let amount = share
            .owed_amount
            .ok_or_else(|| ExpenseError::invalid_amount("owed_amount", ""))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ExpenseError::invalid_amount("owed_amount", amount.to_string()));
        }
    }

    if total_paid <= Decimal::ZERO {
        return Err(ExpenseError::Validation(
            "Total paid amount must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
