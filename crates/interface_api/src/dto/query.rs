//! Query string parameters

use serde::Deserialize;
use validator::Validate;

use core_kernel::{DateWindow, TemporalError};

/// `?year=&month=`; only a complete pair selects a month
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PeriodQuery {
    #[validate(range(min = 1970, max = 9999, message = "year must be between 1970 and 9999"))]
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    pub month: Option<u32>,
}

impl PeriodQuery {
    pub fn window(&self) -> Result<Option<DateWindow>, TemporalError> {
        DateWindow::from_year_month(self.year, self.month)
    }
}

/// `?months=`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TrendsQuery {
    #[validate(range(min = 1, max = 24, message = "months must be between 1 and 24"))]
    pub months: Option<u32>,
}
