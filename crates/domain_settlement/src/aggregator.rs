//! Balance Aggregator
//!
//! Folds every payment and share of a set of expenses into one net figure per
//! active member. Records pointing at a member outside the active list (removed,
//! deactivated, or belonging to another room) are ignored rather than
//! rejected, and are not validated.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use core_kernel::{Currency, ExpenseId, MemberId, Money};
use domain_expense::{Expense, Member};

use crate::balance::MemberBalance;
use crate::error::{AmountField, SettlementError};

/// Running totals for one member
struct Tally<'a> {
    member: &'a Member,
    paid: Money,
    owed: Money,
}

/// Computes per-member balances in a single currency
#[derive(Debug, Clone, Copy)]
pub struct BalanceAggregator {
    currency: Currency,
}

impl BalanceAggregator {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Aggregates payments and shares into member balances
    ///
    /// Output has one entry per active member, in the order of `members`,
    /// including members with no activity at all. A member id listed twice is
    /// counted once, at its first position.
    ///
    /// # Errors
    ///
    /// `SettlementError::InvalidAmount` when a payment or share belonging to an
    /// active member has a missing or negative amount.
    pub fn aggregate(
        &self,
        expenses: &[Expense],
        members: &[Member],
    ) -> Result<Vec<MemberBalance>, SettlementError> {
        let mut index: HashMap<MemberId, usize> = HashMap::with_capacity(members.len());
        let mut tallies: Vec<Tally<'_>> = Vec::with_capacity(members.len());

        for member in members.iter().filter(|m| m.is_active) {
            if index.contains_key(&member.id) {
                continue;
            }
            index.insert(member.id, tallies.len());
            tallies.push(Tally {
                member,
                paid: Money::zero(self.currency),
                owed: Money::zero(self.currency),
            });
        }

        let mut ignored = 0usize;

        for expense in expenses {
            for payment in &expense.payments {
                let Some(slot) = payment.member_id.and_then(|id| index.get(&id).copied()) else {
                    ignored += 1;
                    continue;
                };
                let amount = self.counted_amount(
                    expense.id,
                    payment.member_id,
                    AmountField::PaidAmount,
                    payment.paid_amount,
                )?;
                let tally = &mut tallies[slot];
                tally.paid = tally.paid.checked_add(&amount)?;
            }

            for share in &expense.shares {
                let Some(slot) = index.get(&share.member_id).copied() else {
                    ignored += 1;
                    continue;
                };
                let amount = self.counted_amount(
                    expense.id,
                    Some(share.member_id),
                    AmountField::OwedAmount,
                    share.owed_amount,
                )?;
                let tally = &mut tallies[slot];
                tally.owed = tally.owed.checked_add(&amount)?;
            }
        }

        debug!(
            expenses = expenses.len(),
            members = tallies.len(),
            ignored_records = ignored,
            "Aggregated member balances"
        );

        tallies
            .into_iter()
            .map(|t| MemberBalance::new(t.member, t.paid, t.owed).map_err(SettlementError::from))
            .collect()
    }

    fn counted_amount(
        &self,
        expense_id: ExpenseId,
        member_id: Option<MemberId>,
        field: AmountField,
        value: Option<Decimal>,
    ) -> Result<Money, SettlementError> {
        match value {
            Some(amount) if amount >= Decimal::ZERO => {
                Ok(Money::new(amount, self.currency))
            }
            _ => {
                warn!(
                    expense_id = %expense_id,
                    field = %field,
                    value = ?value,
                    "Rejected amount on counted ledger record"
                );
                Err(SettlementError::InvalidAmount {
                    expense_id,
                    member_id,
                    field,
                    value,
                })
            }
        }
    }
}
