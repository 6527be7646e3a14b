//! Calendar periods used to select which expenses a computation covers
//!
//! Expenses carry an occurrence date. Reports are scoped to an inclusive
//! [`DateWindow`], usually one calendar month. "Today" is resolved in the
//! room's configured [`Timezone`] so a month boundary does not depend on the
//! server's clock zone.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper used to resolve the current calendar date
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s)
            .map(Timezone)
            .map_err(|_| TemporalError::InvalidTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Calendar date of the given instant in this timezone
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Calendar date right now in this timezone
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to period construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        year: i32,
        month: u32,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Date out of range")]
    OutOfRange,
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day covered (inclusive)
    pub start: NaiveDate,
    /// Last day covered (inclusive)
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting a start after the end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The calendar month `month` (1-12) of `year`
    pub fn month(year: i32, month: u32) -> Result<Self, TemporalError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(TemporalError::InvalidMonth { year, month })?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or(TemporalError::OutOfRange)?;
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Result<Self, TemporalError> {
        Self::month(date.year(), date.month())
    }

    /// From the first day of the month `months` months before `today`, up to `today`
    pub fn trailing_months(today: NaiveDate, months: u32) -> Result<Self, TemporalError> {
        let start = today
            .checked_sub_months(Months::new(months))
            .and_then(|d| d.with_day(1))
            .ok_or(TemporalError::OutOfRange)?;
        Self::new(start, today)
    }

    /// Every date from `start` onwards
    pub fn open_ended(start: NaiveDate) -> Self {
        Self {
            start,
            end: NaiveDate::MAX,
        }
    }

    /// Window selected by an optional `year` + `month` pair
    ///
    /// Only a complete pair selects a month; anything else means "no filter".
    pub fn from_year_month(
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Option<Self>, TemporalError> {
        match (year, month) {
            (Some(year), Some(month)) => Self::month(year, month).map(Some),
            _ => Ok(None),
        }
    }

    /// Returns true if `date` falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// `YYYY-MM` key for grouping by calendar month
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
