//! PostgreSQL Ledger Adapter
//!
//! Implements [`LedgerPort`] over [`LedgerRepository`], translating rows into
//! domain records and database failures into `PortError`.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_expense::LedgerPort;
//! use infra_db::PostgresLedgerAdapter;
//!
//! let ledger: Arc<dyn LedgerPort> = Arc::new(PostgresLedgerAdapter::new(pool));
//! let members = ledger.active_members(room_id).await?;
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, Currency, DateWindow, DomainPort, HealthCheckResult, HealthCheckable,
    PortError, RoomId,
};
use domain_expense::{
    Expense, ExpenseCategory, ExpensePayment, ExpenseShare, LedgerPort, Member, Room,
};

use crate::repositories::ledger::{
    ExpenseRow, LedgerRepository, MemberRow, PaymentRow, RoomRow, ShareRow,
};

const ADAPTER_ID: &str = "postgres-ledger-adapter";

/// PostgreSQL-backed implementation of the LedgerPort trait
#[derive(Debug, Clone)]
pub struct PostgresLedgerAdapter {
    repository: LedgerRepository,
}

impl PostgresLedgerAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LedgerRepository::new(pool),
        }
    }

    pub fn repository(&self) -> &LedgerRepository {
        &self.repository
    }
}

impl DomainPort for PostgresLedgerAdapter {}

#[async_trait]
impl HealthCheckable for PostgresLedgerAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {e}"))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl LedgerPort for PostgresLedgerAdapter {
    #[instrument(skip_all, fields(room_id = %room_id))]
    async fn get_room(&self, room_id: RoomId) -> Result<Room, PortError> {
        let row = self.repository.get_room(room_id.into()).await?;
        room_from_row(row)
    }

    #[instrument(skip_all, fields(room_id = %room_id))]
    async fn active_members(&self, room_id: RoomId) -> Result<Vec<Member>, PortError> {
        let rows = self.repository.active_members(room_id.into()).await?;
        debug!(count = rows.len(), "Loaded active members");
        Ok(rows.into_iter().map(member_from_row).collect())
    }

    #[instrument(skip_all, fields(room_id = %room_id))]
    async fn expenses(
        &self,
        room_id: RoomId,
        window: Option<DateWindow>,
    ) -> Result<Vec<Expense>, PortError> {
        let (from, to) = match window {
            Some(w) => (Some(w.start), Some(w.end)),
            None => (None, None),
        };

        let rows = self.repository.expenses(room_id.into(), from, to).await?;
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let (payments, shares) = tokio::try_join!(
            self.repository.payments_for(&ids),
            self.repository.shares_for(&ids),
        )?;

        debug!(
            expenses = rows.len(),
            payments = payments.len(),
            shares = shares.len(),
            "Loaded expenses"
        );

        assemble_expenses(rows, payments, shares)
    }
}

fn room_from_row(row: RoomRow) -> Result<Room, PortError> {
    let currency = Currency::from_str(&row.currency_code).map_err(|_| {
        PortError::transformation(format!(
            "room {} has unsupported currency '{}'",
            row.id, row.currency_code
        ))
    })?;

    Ok(Room {
        id: row.id.into(),
        name: row.name,
        currency,
    })
}

fn member_from_row(row: MemberRow) -> Member {
    Member {
        id: row.id.into(),
        room_id: row.room_id.into(),
        full_name: row.full_name,
        nickname: row.nickname,
        is_active: row.is_active,
    }
}

/// Attaches payments and shares to their expenses, keeping row order
fn assemble_expenses(
    rows: Vec<ExpenseRow>,
    payments: Vec<PaymentRow>,
    shares: Vec<ShareRow>,
) -> Result<Vec<Expense>, PortError> {
    let mut payments_by_expense: HashMap<Uuid, Vec<ExpensePayment>> = HashMap::new();
    for p in payments {
        payments_by_expense
            .entry(p.expense_id)
            .or_default()
            .push(ExpensePayment {
                member_id: p.member_id.map(Into::into),
                paid_amount: p.paid_amount,
            });
    }

    let mut shares_by_expense: HashMap<Uuid, Vec<ExpenseShare>> = HashMap::new();
    for s in shares {
        shares_by_expense
            .entry(s.expense_id)
            .or_default()
            .push(ExpenseShare {
                member_id: s.member_id.into(),
                owed_amount: s.owed_amount,
            });
    }

    rows.into_iter()
        .map(|row| {
            let category = ExpenseCategory::from_str(&row.category).map_err(|_| {
                PortError::transformation(format!(
                    "expense {} has unknown category '{}'",
                    row.id, row.category
                ))
            })?;

            Ok(Expense {
                id: row.id.into(),
                room_id: row.room_id.into(),
                category,
                title: row.title,
                description: row.description,
                expense_date: row.expense_date,
                payments: payments_by_expense.remove(&row.id).unwrap_or_default(),
                shares: shares_by_expense.remove(&row.id).unwrap_or_default(),
            })
        })
        .collect()
}
