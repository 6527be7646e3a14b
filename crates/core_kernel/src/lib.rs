//! Core Kernel - Foundational types for the room ledger
//!
//! This crate provides the building blocks shared by every other crate:
//! - Money types with precise decimal arithmetic
//! - Calendar windows for scoping reports to a month or a trailing range
//! - Strongly-typed identifiers
//! - Port abstractions for injected collaborators (storage, external systems)

pub mod money;
pub mod period;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use period::{DateWindow, Timezone, TemporalError, month_key};
pub use identifiers::{RoomId, MemberId, ExpenseId};
pub use error::CoreError;
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
