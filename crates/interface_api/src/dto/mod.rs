//! Request and response DTOs
//!
//! Responses use camelCase field names. Money leaves the API rounded to the
//! room currency's minor unit and serialized as a JSON number.

pub mod query;
pub mod balances;
pub mod analytics;

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::DateWindow;

/// Date range a response covers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<DateWindow> for PeriodDto {
    fn from(window: DateWindow) -> Self {
        Self {
            start_date: window.start,
            end_date: window.end,
        }
    }
}
