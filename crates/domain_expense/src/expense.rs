//! Expense records with their payments and shares
//!
//! These are read-only value objects as far as the settlement engine is
//! concerned. Amounts are `Option<Decimal>` because the storage columns are
//! nullable; deciding what a missing amount means is up to the consumer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ExpenseId, MemberId, RoomId};
use crate::category::ExpenseCategory;

/// One contribution of money toward an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensePayment {
    /// Payer; `None` once the member record has been removed
    pub member_id: Option<MemberId>,
    pub paid_amount: Option<Decimal>,
}

impl ExpensePayment {
    pub fn new(member_id: MemberId, paid_amount: Decimal) -> Self {
        Self {
            member_id: Some(member_id),
            paid_amount: Some(paid_amount),
        }
    }
}

/// One member's obligation toward an expense's cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub member_id: MemberId,
    pub owed_amount: Option<Decimal>,
}

impl ExpenseShare {
    pub fn new(member_id: MemberId, owed_amount: Decimal) -> Self {
        Self {
            member_id,
            owed_amount: Some(owed_amount),
        }
    }
}

/// A recorded shared expense
///
/// Shares need not sum to the payments: over- or under-allocation is allowed
/// and shows up as an imbalance in the room's balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub room_id: RoomId,
    pub category: ExpenseCategory,
    pub title: String,
    pub description: Option<String>,
    /// Date the expense occurred
    pub expense_date: NaiveDate,
    pub payments: Vec<ExpensePayment>,
    pub shares: Vec<ExpenseShare>,
}

impl Expense {
    /// Creates an expense with no payments or shares yet
    pub fn new(
        room_id: RoomId,
        title: impl Into<String>,
        category: ExpenseCategory,
        expense_date: NaiveDate,
    ) -> Self {
        Self {
            id: ExpenseId::new_v7(),
            room_id,
            category,
            title: title.into(),
            description: None,
            expense_date,
            payments: Vec::new(),
            shares: Vec::new(),
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a payment by `member_id`
    pub fn paid_by(mut self, member_id: MemberId, amount: Decimal) -> Self {
        self.payments.push(ExpensePayment::new(member_id, amount));
        self
    }

    /// Adds a share owed by `member_id`
    pub fn owed_by(mut self, member_id: MemberId, amount: Decimal) -> Self {
        self.shares.push(ExpenseShare::new(member_id, amount));
        self
    }

    /// Adds an arbitrary payment record
    pub fn with_payment(mut self, payment: ExpensePayment) -> Self {
        self.payments.push(payment);
        self
    }

    /// Adds an arbitrary share record
    pub fn with_share(mut self, share: ExpenseShare) -> Self {
        self.shares.push(share);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder_collects_payments_and_shares_in_order() {
        let room = RoomId::new();
        let (a, b) = (MemberId::new(), MemberId::new());
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let expense = Expense::new(room, "Groceries run", ExpenseCategory::Groceries, date)
            .paid_by(a, dec!(20))
            .paid_by(b, dec!(10))
            .owed_by(a, dec!(15))
            .owed_by(b, dec!(15));

        assert_eq!(expense.payments.len(), 2);
        assert_eq!(expense.payments[0].member_id, Some(a));
        assert_eq!(expense.shares[1], ExpenseShare::new(b, dec!(15)));
    }
}
