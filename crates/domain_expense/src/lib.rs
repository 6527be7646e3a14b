//! Expense Ledger Domain
//!
//! Value objects for the shared-living ledger and the port through which the
//! rest of the system reads it.
//!
//! - **Room**: a group of members sharing costs in a single currency
//! - **Member**: a person in a room; inactive members keep their history
//! - **Expense**: a dated, categorised cost with one or more payments
//!   (who put money in) and zero or more shares (who owes what)
//!
//! Creating, editing and deleting records belongs to the storage side. This
//! crate only describes the records, validates raw input at the boundary, and
//! defines [`LedgerPort`].
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::Currency;
//! use domain_expense::{Expense, ExpenseCategory, Member, Room};
//! use rust_decimal_macros::dec;
//!
//! let room = Room::new("Flat 4B", Currency::USD);
//! let asha = Member::new(room.id, "Asha");
//! let bikash = Member::new(room.id, "Bikash");
//!
//! let expense = Expense::new(
//!     room.id,
//!     "Internet, March",
//!     ExpenseCategory::Internet,
//!     NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
//! )
//! .paid_by(asha.id, dec!(60))
//! .owed_by(asha.id, dec!(30))
//! .owed_by(bikash.id, dec!(30));
//!
//! assert_eq!(expense.shares.len(), 2);
//! ```

pub mod category;
pub mod room;
pub mod expense;
pub mod validation;
pub mod error;
pub mod ports;

pub use category::ExpenseCategory;
pub use room::{Room, Member};
pub use expense::{Expense, ExpensePayment, ExpenseShare};
pub use validation::{parse_amount, validate_expense};
pub use error::ExpenseError;
pub use ports::LedgerPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockLedgerPort;
