//! Settlement entry point
//!
//! `settle` is a pure function of its inputs: no I/O, no shared state. It can
//! be called from any number of concurrent requests.

use tracing::debug;

use core_kernel::Currency;
use domain_expense::{Expense, Member};

use crate::aggregator::BalanceAggregator;
use crate::balance::SettlementOutcome;
use crate::error::SettlementError;
use crate::planner::SettlementPlanner;

/// Computes member balances and the transfers that settle them
///
/// # Arguments
///
/// * `expenses` - Expenses already scoped to the period of interest
/// * `members` - The room's active members, in the order the planner should follow
/// * `currency` - The room currency every amount is tagged with
pub fn settle(
    expenses: &[Expense],
    members: &[Member],
    currency: Currency,
) -> Result<SettlementOutcome, SettlementError> {
    let balances = BalanceAggregator::new(currency).aggregate(expenses, members)?;
    let transfers = SettlementPlanner::new().plan(&balances)?;

    debug!(
        balances = balances.len(),
        transfers = transfers.len(),
        currency = %currency,
        "Settlement computed"
    );

    Ok(SettlementOutcome {
        balances,
        transfers,
    })
}
