use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use shared::util::{self, Bound};

use crate::error::{ReportError, ReportResult};

/// Inclusive calendar-date window in the business time zone
///
/// `start()` is the first date at 00:00:00.000 local, `end()` the last
/// date at 23:59:59.999 local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(skip)]
    tz: Tz,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, tz: Tz) -> ReportResult<Self> {
        if start_date > end_date {
            return Err(ReportError::InvalidRange {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }

        let start = util::local_instant(start_date, 0, 0, 0, 0, tz, Bound::Start)
            .ok_or_else(|| ReportError::InvalidDate(start_date.to_string()))?;
        let end = util::local_instant(end_date, 23, 59, 59, 999, tz, Bound::End)
            .ok_or_else(|| ReportError::InvalidDate(end_date.to_string()))?;

        Ok(Self {
            start_date,
            end_date,
            tz,
            start,
            end,
        })
    }

    /// Build from `YYYY-MM-DD` strings
    pub fn parse(start_date: &str, end_date: &str, tz: Tz) -> ReportResult<Self> {
        let start = util::parse_date(start_date)
            .ok_or_else(|| ReportError::InvalidDate(start_date.to_string()))?;
        let end = util::parse_date(end_date)
            .ok_or_else(|| ReportError::InvalidDate(end_date.to_string()))?;
        Self::new(start, end, tz)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// `start <= instant <= end`, compared at millisecond precision
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let instant = instant.trunc_subsecs(3);
        self.start <= instant && instant <= self.end
    }
}
