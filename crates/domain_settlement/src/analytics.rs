//! Room analytics
//!
//! Monthly summary, category breakdown, month-by-month trends and the
//! dashboard figures. The cost of an expense is what was paid for it, so every
//! total here sums payment amounts, including payments from members who have
//! since left the room.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{month_key, Currency, DateWindow, Money};
use domain_expense::{Expense, ExpenseCategory, Member, Room};

use crate::aggregator::BalanceAggregator;
use crate::balance::MemberBalance;
use crate::error::{AmountField, SettlementError};
use crate::precision::PrecisionPolicy;

/// Spending for one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub window: DateWindow,
    pub total_expenses: Money,
    pub expense_count: usize,
    /// Paid and owed totals per active member
    pub member_totals: Vec<MemberBalance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total_amount: Money,
    pub expense_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// `YYYY-MM`
    pub month: String,
    pub total_amount: Money,
    pub expense_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_roommates: usize,
    pub window_total: Money,
    pub window_expense_count: usize,
    pub all_time_total: Money,
    pub all_time_expense_count: usize,
    /// Window total split over active members; exact, zero without members
    pub average_cost_per_person: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub room: Room,
    pub window: DateWindow,
    pub stats: DashboardStats,
    pub members: Vec<Member>,
}

/// Report calculations for one room currency
#[derive(Debug, Clone, Copy)]
pub struct ExpenseAnalytics {
    currency: Currency,
}

impl ExpenseAnalytics {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Total paid for a single expense
    ///
    /// Every payment counts here, so every payment amount must be present and
    /// non-negative.
    pub fn expense_total(&self, expense: &Expense) -> Result<Money, SettlementError> {
        let mut total = Money::zero(self.currency);
        for payment in &expense.payments {
            let amount = match payment.paid_amount {
                Some(amount) if amount >= Decimal::ZERO => amount,
                value => {
                    return Err(SettlementError::InvalidAmount {
                        expense_id: expense.id,
                        member_id: payment.member_id,
                        field: AmountField::PaidAmount,
                        value,
                    })
                }
            };
            total = total.checked_add(&Money::new(amount, self.currency))?;
        }
        Ok(total)
    }

    /// Sum and count over a set of expenses
    pub fn totals(&self, expenses: &[Expense]) -> Result<(Money, usize), SettlementError> {
        let mut total = Money::zero(self.currency);
        for expense in expenses {
            total = total.checked_add(&self.expense_total(expense)?)?;
        }
        Ok((total, expenses.len()))
    }

    /// Totals for a window plus each active member's paid and owed figures
    ///
    /// `expenses` must already be restricted to `window`.
    pub fn monthly_summary(
        &self,
        window: DateWindow,
        expenses: &[Expense],
        members: &[Member],
    ) -> Result<MonthlySummary, SettlementError> {
        let (total_expenses, expense_count) = self.totals(expenses)?;
        let member_totals = BalanceAggregator::new(self.currency).aggregate(expenses, members)?;

        Ok(MonthlySummary {
            window,
            total_expenses,
            expense_count,
            member_totals,
        })
    }

    /// Spending per category, largest first
    ///
    /// Categories without expenses are omitted. Equal totals keep category
    /// order.
    pub fn category_breakdown(
        &self,
        expenses: &[Expense],
    ) -> Result<Vec<CategoryTotal>, SettlementError> {
        let mut groups: BTreeMap<ExpenseCategory, (Money, usize)> = BTreeMap::new();
        for expense in expenses {
            let cost = self.expense_total(expense)?;
            let entry = groups
                .entry(expense.category)
                .or_insert((Money::zero(self.currency), 0));
            entry.0 = entry.0.checked_add(&cost)?;
            entry.1 += 1;
        }

        let mut totals: Vec<CategoryTotal> = groups
            .into_iter()
            .map(|(category, (total_amount, expense_count))| CategoryTotal {
                category,
                total_amount,
                expense_count,
            })
            .collect();
        totals.sort_by(|a, b| b.total_amount.amount().cmp(&a.total_amount.amount()));
        Ok(totals)
    }

    /// Spending per calendar month, oldest first
    pub fn monthly_trends(&self, expenses: &[Expense]) -> Result<Vec<MonthlyTrend>, SettlementError> {
        let mut groups: BTreeMap<String, (Money, usize)> = BTreeMap::new();
        for expense in expenses {
            let cost = self.expense_total(expense)?;
            let entry = groups
                .entry(month_key(expense.expense_date))
                .or_insert((Money::zero(self.currency), 0));
            entry.0 = entry.0.checked_add(&cost)?;
            entry.1 += 1;
        }

        Ok(groups
            .into_iter()
            .map(|(month, (total_amount, expense_count))| MonthlyTrend {
                month,
                total_amount,
                expense_count,
            })
            .collect())
    }

    /// Dashboard figures
    ///
    /// `all_expenses` is the room's full history; the window figures are taken
    /// from the expenses inside `window`.
    pub fn dashboard(
        &self,
        room: Room,
        window: DateWindow,
        all_expenses: &[Expense],
        members: Vec<Member>,
    ) -> Result<Dashboard, SettlementError> {
        let in_window: Vec<Expense> = all_expenses
            .iter()
            .filter(|e| window.contains(e.expense_date))
            .cloned()
            .collect();

        let (window_total, window_expense_count) = self.totals(&in_window)?;
        let (all_time_total, all_time_expense_count) = self.totals(all_expenses)?;
        let total_roommates = members.iter().filter(|m| m.is_active).count();
        let average_cost_per_person =
            PrecisionPolicy::average_per_member(&window_total, total_roommates)?;

        Ok(Dashboard {
            room,
            window,
            stats: DashboardStats {
                total_roommates,
                window_total,
                window_expense_count,
                all_time_total,
                all_time_expense_count,
                average_cost_per_person,
            },
            members,
        })
    }
}
