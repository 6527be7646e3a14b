//! Settlement service
//!
//! Reads a room's ledger through the injected [`LedgerPort`] and hands the
//! records to the pure engine. The service holds no mutable state; a single
//! instance is shared by every request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use core_kernel::{DateWindow, RoomId, Timezone};
use domain_expense::{LedgerPort, Room};

use crate::analytics::{CategoryTotal, Dashboard, ExpenseAnalytics, MonthlySummary, MonthlyTrend};
use crate::balance::SettlementOutcome;
use crate::engine::settle;
use crate::error::SettlementError;

/// Balances and settlement for a room over an optional window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub room: Room,
    /// `None` covers the room's whole history
    pub window: Option<DateWindow>,
    pub outcome: SettlementOutcome,
}

/// Spending per category over a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub room: Room,
    pub window: DateWindow,
    pub categories: Vec<CategoryTotal>,
}

/// Spending per month over a trailing window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendReport {
    pub room: Room,
    pub window: DateWindow,
    pub months: Vec<MonthlyTrend>,
}

/// Monthly summary with the room it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub room: Room,
    pub summary: MonthlySummary,
}

/// Entry point for balance, settlement and analytics requests
#[derive(Clone)]
pub struct SettlementService {
    ledger: Arc<dyn LedgerPort>,
    timezone: Timezone,
}

impl SettlementService {
    /// Creates a service over a ledger, resolving "this month" in `timezone`
    pub fn new(ledger: Arc<dyn LedgerPort>, timezone: Timezone) -> Self {
        Self { ledger, timezone }
    }

    /// The calendar month containing today, in the configured timezone
    pub fn current_month(&self) -> Result<DateWindow, SettlementError> {
        Ok(DateWindow::month_of(self.timezone.today())?)
    }

    /// Net balances and the transfers that settle them
    ///
    /// With a window, only expenses dated inside it are considered; nothing
    /// carries over from earlier periods.
    #[instrument(skip_all, fields(room_id = %room_id, window = ?window))]
    pub async fn room_balances(
        &self,
        room_id: RoomId,
        window: Option<DateWindow>,
    ) -> Result<BalanceReport, SettlementError> {
        let (room, members, expenses) = tokio::try_join!(
            self.ledger.get_room(room_id),
            self.ledger.active_members(room_id),
            self.ledger.expenses(room_id, window),
        )?;

        let outcome = settle(&expenses, &members, room.currency)?;

        info!(
            members = members.len(),
            expenses = expenses.len(),
            transfers = outcome.transfers.len(),
            "Computed room balances"
        );

        Ok(BalanceReport {
            room,
            window,
            outcome,
        })
    }

    /// Totals for a month; defaults to the current month
    #[instrument(skip_all, fields(room_id = %room_id, window = ?window))]
    pub async fn monthly_summary(
        &self,
        room_id: RoomId,
        window: Option<DateWindow>,
    ) -> Result<SummaryReport, SettlementError> {
        let window = self.window_or_current(window)?;
        let (room, members, expenses) = tokio::try_join!(
            self.ledger.get_room(room_id),
            self.ledger.active_members(room_id),
            self.ledger.expenses(room_id, Some(window)),
        )?;

        let summary =
            ExpenseAnalytics::new(room.currency).monthly_summary(window, &expenses, &members)?;

        Ok(SummaryReport { room, summary })
    }

    /// Spending per category; defaults to the current month
    #[instrument(skip_all, fields(room_id = %room_id, window = ?window))]
    pub async fn category_breakdown(
        &self,
        room_id: RoomId,
        window: Option<DateWindow>,
    ) -> Result<CategoryReport, SettlementError> {
        let window = self.window_or_current(window)?;
        let (room, expenses) = tokio::try_join!(
            self.ledger.get_room(room_id),
            self.ledger.expenses(room_id, Some(window)),
        )?;

        let categories = ExpenseAnalytics::new(room.currency).category_breakdown(&expenses)?;

        Ok(CategoryReport {
            room,
            window,
            categories,
        })
    }

    /// Spending per month starting `months` months back
    ///
    /// The reported window ends today, but expenses dated after today (rent
    /// entered early) are still counted.
    #[instrument(skip_all, fields(room_id = %room_id, months = months))]
    pub async fn trends(&self, room_id: RoomId, months: u32) -> Result<TrendReport, SettlementError> {
        let window = DateWindow::trailing_months(self.timezone.today(), months)?;
        let (room, expenses) = tokio::try_join!(
            self.ledger.get_room(room_id),
            self.ledger.expenses(room_id, Some(DateWindow::open_ended(window.start))),
        )?;

        let months = ExpenseAnalytics::new(room.currency).monthly_trends(&expenses)?;

        Ok(TrendReport {
            room,
            window,
            months,
        })
    }

    /// Dashboard figures; the window defaults to the current month
    #[instrument(skip_all, fields(room_id = %room_id, window = ?window))]
    pub async fn dashboard(
        &self,
        room_id: RoomId,
        window: Option<DateWindow>,
    ) -> Result<Dashboard, SettlementError> {
        let window = self.window_or_current(window)?;
        let (room, members, expenses) = tokio::try_join!(
            self.ledger.get_room(room_id),
            self.ledger.active_members(room_id),
            self.ledger.expenses(room_id, None),
        )?;

        let currency = room.currency;
        ExpenseAnalytics::new(currency).dashboard(room, window, &expenses, members)
    }

    fn window_or_current(&self, window: Option<DateWindow>) -> Result<DateWindow, SettlementError> {
        match window {
            Some(window) => Ok(window),
            None => self.current_month(),
        }
    }
}

impl std::fmt::Debug for SettlementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementService")
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}
