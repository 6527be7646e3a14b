//! Ledger repository
//!
//! Read-only queries over rooms, members, expenses and their payments and
//! shares. Queries are checked at runtime so the crate builds without a live
//! database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RoomRow {
    pub id: Uuid,
    pub name: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MemberRow {
    pub id: Uuid,
    pub room_id: Uuid,
    pub full_name: String,
    pub nickname: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ExpenseRow {
    pub id: Uuid,
    pub room_id: Uuid,
    pub category: String,
    pub title: String,
    pub description: Option<String>,
    pub expense_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PaymentRow {
    pub expense_id: Uuid,
    pub member_id: Option<Uuid>,
    pub paid_amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ShareRow {
    pub expense_id: Uuid,
    pub member_id: Uuid,
    pub owed_amount: Option<Decimal>,
}

/// Repository for the room ledger tables
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a room by id
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` when the room does not exist
    pub async fn get_room(&self, room_id: Uuid) -> Result<RoomRow, DatabaseError> {
        sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, name, currency_code
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Room", room_id))
    }

    /// Active members of a room, oldest first
    pub async fn active_members(&self, room_id: Uuid) -> Result<Vec<MemberRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, room_id, full_name, nickname, is_active
            FROM members
            WHERE room_id = $1 AND is_active
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Expenses of a room, optionally restricted to an inclusive date range
    pub async fn expenses(
        &self,
        room_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ExpenseRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, room_id, category, title, description, expense_date
            FROM expenses
            WHERE room_id = $1
              AND ($2::date IS NULL OR expense_date >= $2)
              AND ($3::date IS NULL OR expense_date <= $3)
            ORDER BY expense_date DESC, created_at DESC, id ASC
            "#,
        )
        .bind(room_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Payments belonging to any of `expense_ids`, in recording order
    pub async fn payments_for(&self, expense_ids: &[Uuid]) -> Result<Vec<PaymentRow>, DatabaseError> {
        if expense_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT expense_id, member_id, paid_amount
            FROM expense_payments
            WHERE expense_id = ANY($1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(expense_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Shares belonging to any of `expense_ids`, in recording order
    pub async fn shares_for(&self, expense_ids: &[Uuid]) -> Result<Vec<ShareRow>, DatabaseError> {
        if expense_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ShareRow>(
            r#"
            SELECT expense_id, member_id, owed_amount
            FROM expense_shares
            WHERE expense_id = ANY($1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(expense_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Round-trips a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
