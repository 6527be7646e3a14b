//! Settlement Domain - Balances, settlement plans and room analytics
//!
//! This crate turns a room's expense records into:
//! - A net balance per active member (`balance = owed - paid`)
//! - A list of transfers that settles those balances
//! - Spending reports (monthly summary, categories, trends, dashboard)
//!
//! The computation is split into pure pieces:
//!
//! - [`BalanceAggregator`] folds payments and shares into member balances
//! - [`SettlementPlanner`] matches debtors to creditors greedily, in input order
//! - [`PrecisionPolicy`] rounds for display only, never mid-computation
//!
//! [`settle`] wires the first two together. [`SettlementService`] reads the
//! ledger through an injected `LedgerPort` and calls into the pure code.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::{Currency, RoomId};
//! use domain_expense::{Expense, ExpenseCategory, Member};
//! use domain_settlement::settle;
//! use rust_decimal::Decimal;
//!
//! let room = RoomId::new();
//! let (a, b) = (Member::new(room, "Asha"), Member::new(room, "Bikash"));
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let dinner = Expense::new(room, "Dinner", ExpenseCategory::Groceries, date)
//!     .paid_by(a.id, Decimal::from(40))
//!     .owed_by(a.id, Decimal::from(20))
//!     .owed_by(b.id, Decimal::from(20));
//!
//! let outcome = settle(&[dinner], &[a, b], Currency::USD).unwrap();
//! assert_eq!(outcome.transfers.len(), 1);
//! assert_eq!(outcome.transfers[0].from_name, "Bikash");
//! ```

pub mod aggregator;
pub mod analytics;
pub mod balance;
pub mod engine;
pub mod error;
pub mod planner;
pub mod precision;
pub mod service;

pub use aggregator::BalanceAggregator;
pub use analytics::{
    CategoryTotal, Dashboard, DashboardStats, ExpenseAnalytics, MonthlySummary, MonthlyTrend,
};
pub use balance::{MemberBalance, SettlementOutcome, Transfer};
pub use engine::settle;
pub use error::{AmountField, SettlementError};
pub use planner::SettlementPlanner;
pub use precision::PrecisionPolicy;
pub use service::{BalanceReport, CategoryReport, SettlementService, SummaryReport, TrendReport};
