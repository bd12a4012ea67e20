use crate::error::RoutineError;
use crate::service::calendar;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucketing resolution for dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
}

/// A calendar year or a calendar month.
///
/// Ordered by start date, so sorting a list of periods of one granularity
/// yields chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "PeriodView")]
pub struct Period {
    start: NaiveDate,
    granularity: Granularity,
}

#[derive(Serialize)]
struct PeriodView {
    granularity: Granularity,
    year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<u32>,
    label: String,
}

impl From<Period> for PeriodView {
    fn from(p: Period) -> Self {
        Self {
            granularity: p.granularity,
            year: p.year(),
            month: p.month(),
            label: p.to_string(),
        }
    }
}

impl Period {
    /// The period of the given granularity that contains `date`.
    pub fn containing(date: NaiveDate, granularity: Granularity) -> Self {
        let start = match granularity {
            Granularity::Year => calendar::year_start(date),
            Granularity::Month => calendar::month_start(date),
        };
        Self { start, granularity }
    }

    pub fn of_year(year: i32) -> Result<Self, RoutineError> {
        let start = supported_year(year)
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .ok_or_else(|| RoutineError::validation(format!("year out of range: {year}")))?;
        Self::checked(start, Granularity::Year)
    }

    pub fn of_month(year: i32, month: u32) -> Result<Self, RoutineError> {
        let start = supported_year(year)
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, 1))
            .ok_or_else(|| {
                RoutineError::validation(format!("invalid year/month: {year}-{month:02}"))
            })?;
        Self::checked(start, Granularity::Month)
    }

    fn checked(start: NaiveDate, granularity: Granularity) -> Result<Self, RoutineError> {
        let period = Self { start, granularity };
        calendar::period_end(start, period.months())
            .ok_or_else(|| RoutineError::validation(format!("period out of range: {period}")))?;
        Ok(period)
    }

    fn months(&self) -> u32 {
        match self.granularity {
            Granularity::Year => 12,
            Granularity::Month => 1,
        }
    }

    /// Year period when `month` is absent, month period otherwise.
    pub fn from_parts(year: i32, month: Option<u32>) -> Result<Self, RoutineError> {
        match month {
            Some(m) => Self::of_month(year, m),
            None => Self::of_year(year),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        // only the period holding chrono's last date overflows
        calendar::period_end(self.start, self.months()).unwrap_or(NaiveDate::MAX)
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> Option<u32> {
        match self.granularity {
            Granularity::Year => None,
            Granularity::Month => Some(self.start.month()),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }

    /// Day-span of this period as of `today`; see [`calendar::span_days`].
    pub fn span_days(&self, today: NaiveDate) -> i64 {
        calendar::span_days(self.start, self.end(), today)
    }
}

fn supported_year(year: i32) -> Option<i32> {
    calendar::is_supported_year(year).then_some(year)
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.granularity {
            Granularity::Year => write!(f, "{}", self.start.year()),
            Granularity::Month => write!(f, "{}-{:02}", self.start.year(), self.start.month()),
        }
    }
}
