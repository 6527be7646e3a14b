//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! room ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built rooms with known balances
//! - `builders`: Builder patterns for members and expenses
//! - `assertions`: Settlement assertions with readable failure messages
//! - `generators`: Property-based ledger generators
//!
//! Use from integration tests (`tests/`) only: this crate depends on
//! `domain_settlement`, so unit tests inside that crate would see a second
//! copy of its types.

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
