//! Ledger Port
//!
//! The ledger (rooms, members, expenses with payments and shares) is owned by
//! a storage collaborator. The settlement engine only reads from it, through
//! the `LedgerPort` trait defined here.
//!
//! # Adapters
//!
//! - **PostgreSQL**: `infra_db::PostgresLedgerAdapter`
//! - **In-memory mock**: [`mock::MockLedgerPort`] (feature `mock`), used by
//!   service and HTTP tests
//!
//! # Ordering contract
//!
//! `active_members` returns members in creation order (ties broken by id).
//! The settlement planner matches debtors and creditors in this order, so
//! every adapter must honour it for results to be reproducible across
//! backends.

use async_trait::async_trait;

use core_kernel::{DateWindow, DomainPort, HealthCheckable, PortError, RoomId};

use crate::expense::Expense;
use crate::room::{Member, Room};

/// Read access to a room's ledger
#[async_trait]
pub trait LedgerPort: DomainPort + HealthCheckable {
    /// Retrieves a room
    ///
    /// # Returns
    ///
    /// The room, or `PortError::NotFound`
    async fn get_room(&self, room_id: RoomId) -> Result<Room, PortError>;

    /// Active members of a room, in creation order
    async fn active_members(&self, room_id: RoomId) -> Result<Vec<Member>, PortError>;

    /// Expenses of a room with their payments and shares
    ///
    /// # Arguments
    ///
    /// * `room_id` - The room
    /// * `window` - Optional inclusive date window on `expense_date`; `None` returns everything
    async fn expenses(
        &self,
        room_id: RoomId,
        window: Option<DateWindow>,
    ) -> Result<Vec<Expense>, PortError>;
}

/// Mock implementation of LedgerPort for testing
///
/// Stores everything in memory. Members and expenses keep insertion order.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of LedgerPort
    #[derive(Debug, Default)]
    pub struct MockLedgerPort {
        rooms: Arc<RwLock<HashMap<RoomId, Room>>>,
        members: Arc<RwLock<Vec<Member>>>,
        expenses: Arc<RwLock<Vec<Expense>>>,
        unavailable: AtomicBool,
    }

    impl MockLedgerPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates a room with its members and expenses
        pub async fn with_room(room: Room, members: Vec<Member>, expenses: Vec<Expense>) -> Self {
            let port = Self::new();
            port.insert_room(room).await;
            for member in members {
                port.insert_member(member).await;
            }
            for expense in expenses {
                port.insert_expense(expense).await;
            }
            port
        }

        pub async fn insert_room(&self, room: Room) {
            self.rooms.write().await.insert(room.id, room);
        }

        pub async fn insert_member(&self, member: Member) {
            self.members.write().await.push(member);
        }

        pub async fn insert_expense(&self, expense: Expense) {
            self.expenses.write().await.push(expense);
        }

        /// Makes every subsequent call fail with `PortError::ServiceUnavailable`
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::ServiceUnavailable {
                    service: "mock-ledger".to_string(),
                });
            }
            Ok(())
        }
    }

    impl DomainPort for MockLedgerPort {}

    #[async_trait]
    impl HealthCheckable for MockLedgerPort {
        async fn health_check(&self) -> core_kernel::HealthCheckResult {
            let status = if self.unavailable.load(Ordering::SeqCst) {
                core_kernel::AdapterHealth::Unhealthy
            } else {
                core_kernel::AdapterHealth::Healthy
            };
            core_kernel::HealthCheckResult {
                adapter_id: "mock-ledger-port".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl LedgerPort for MockLedgerPort {
        async fn get_room(&self, room_id: RoomId) -> Result<Room, PortError> {
            self.check_available()?;
            self.rooms
                .read()
                .await
                .get(&room_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Room", room_id))
        }

        async fn active_members(&self, room_id: RoomId) -> Result<Vec<Member>, PortError> {
            self.check_available()?;
            Ok(self
                .members
                .read()
                .await
                .iter()
                .filter(|m| m.room_id == room_id && m.is_active)
                .cloned()
                .collect())
        }

        async fn expenses(
            &self,
            room_id: RoomId,
            window: Option<DateWindow>,
        ) -> Result<Vec<Expense>, PortError> {
            self.check_available()?;
            Ok(self
                .expenses
                .read()
                .await
                .iter()
                .filter(|e| e.room_id == room_id)
                .filter(|e| window.map_or(true, |w| w.contains(e.expense_date)))
                .cloned()
                .collect())
        }
    }
}
