//! Repository implementations
//!
//! Repositories speak in database rows; the adapters in [`crate::adapters`]
//! turn those rows into domain types.

pub mod ledger;

pub use ledger::{LedgerRepository, RoomRow, MemberRow, ExpenseRow, PaymentRow, ShareRow};
