//! Settlement Planner
//!
//! Greedy matching of debtors to creditors. Not a minimum-transaction solver:
//! it produces at most `debtors + creditors - 1` transfers, which is good
//! enough for a room of housemates.
//!
//! # Ordering
//!
//! Debtors and creditors are taken in the order they appear in the input.
//! Nothing is sorted by magnitude. Given the same balances in the same order
//! the plan is always identical, and callers rely on that order for
//! tie-breaking.

use tracing::debug;

use core_kernel::Money;

use crate::balance::{MemberBalance, Transfer};
use crate::error::SettlementError;

/// Plans transfers that settle a set of balances
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementPlanner;

impl SettlementPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Produces the ordered transfer list
    ///
    /// Each debtor pays creditors starting from a cursor shared by all
    /// debtors. A creditor whose claim is used up is skipped by every later
    /// debtor. Settled members never appear in a transfer.
    ///
    /// If the balances do not sum to zero, the side with the larger total is
    /// left partially unsettled; nobody is asked to pay or receive more than
    /// their own balance.
    pub fn plan(&self, balances: &[MemberBalance]) -> Result<Vec<Transfer>, SettlementError> {
        let debtors: Vec<&MemberBalance> = balances.iter().filter(|b| b.is_debtor()).collect();
        let mut creditors: Vec<(&MemberBalance, Money)> = balances
            .iter()
            .filter(|b| b.is_creditor())
            .map(|b| (b, b.balance.abs()))
            .collect();

        let mut transfers =
            Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
        let mut cursor = 0usize;

        for debtor in &debtors {
            let mut remaining = debtor.balance;

            while remaining.is_positive() && cursor < creditors.len() {
                let (creditor, claim) = &mut creditors[cursor];
                let amount = remaining.checked_min(claim)?;

                transfers.push(Transfer::between(debtor, creditor, amount));
                remaining = remaining.checked_sub(&amount)?;
                *claim = claim.checked_sub(&amount)?;

                if !claim.is_positive() {
                    cursor += 1;
                }
            }
        }

        debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transfers = transfers.len(),
            "Planned settlement"
        );

        Ok(transfers)
    }
}
