//! Balance and transfer result types
//!
//! Both are ephemeral: computed per request and never persisted.

use serde::{Deserialize, Serialize};

use core_kernel::{MemberId, Money, MoneyError};
use domain_expense::Member;

/// Net position of one active member over the selected expenses
///
/// `balance = total_owed - total_paid`. Positive means the member owes money
/// into the group; negative means the group owes the member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub member_name: String,
    pub total_paid: Money,
    pub total_owed: Money,
    pub balance: Money,
}

impl MemberBalance {
    /// Builds a balance from the member's paid and owed totals
    pub fn new(
        member: &Member,
        total_paid: Money,
        total_owed: Money,
    ) -> Result<Self, MoneyError> {
        Ok(Self {
            member_id: member.id,
            member_name: member.full_name.clone(),
            total_paid,
            balance: total_owed.checked_sub(&total_paid)?,
            total_owed,
        })
    }

    /// Owes money into the group
    pub fn is_debtor(&self) -> bool {
        self.balance.is_positive()
    }

    /// Is owed money by the group
    pub fn is_creditor(&self) -> bool {
        self.balance.is_negative()
    }

    pub fn is_settled(&self) -> bool {
        self.balance.is_zero()
    }
}

/// A single payment one member should make to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from_member_id: MemberId,
    pub from_name: String,
    pub to_member_id: MemberId,
    pub to_name: String,
    /// Always strictly positive
    pub amount: Money,
}

impl Transfer {
    pub(crate) fn between(debtor: &MemberBalance, creditor: &MemberBalance, amount: Money) -> Self {
        Self {
            from_member_id: debtor.member_id,
            from_name: debtor.member_name.clone(),
            to_member_id: creditor.member_id,
            to_name: creditor.member_name.clone(),
            amount,
        }
    }
}

/// Balances and the transfers that settle them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementOutcome {
    pub balances: Vec<MemberBalance>,
    pub transfers: Vec<Transfer>,
}

impl SettlementOutcome {
    /// Sum of all balances
    ///
    /// Zero when every expense's shares add up to its payments. Over-allocated
    /// shares leave a positive imbalance, under-allocated ones a negative one.
    pub fn imbalance(&self) -> Result<Option<Money>, MoneyError> {
        let mut iter = self.balances.iter();
        let Some(first) = iter.next() else {
            return Ok(None);
        };
        iter.try_fold(first.balance, |acc, b| acc.checked_add(&b.balance))
            .map(Some)
    }

    /// True when there is nothing to settle
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}
