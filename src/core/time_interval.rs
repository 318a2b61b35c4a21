use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
// 1970-01-04, the first Sunday after the epoch.
const FIRST_SUNDAY_MS: i64 = 3 * DAY_MS;

/// Calendar-aware UTC interval with a step count.
///
/// Fixed-length units align to multiples of their length since the epoch.
/// Weeks start on Sunday and step in `n`-week multiples from 1970-01-04;
/// months and years align to multiples of the step within their parent unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", content = "step", rename_all = "snake_case")]
pub enum TimeInterval {
    Millisecond(u32),
    Second(u32),
    Minute(u32),
    Hour(u32),
    Day(u32),
    Week(u32),
    Month(u32),
    Year(u32),
}

/// Candidate intervals for nice time domains and ticks, shortest first.
pub(crate) const TICK_INTERVALS: [TimeInterval; 17] = [
    TimeInterval::Second(1),
    TimeInterval::Second(5),
    TimeInterval::Second(15),
    TimeInterval::Second(30),
    TimeInterval::Minute(1),
    TimeInterval::Minute(5),
    TimeInterval::Minute(15),
    TimeInterval::Minute(30),
    TimeInterval::Hour(1),
    TimeInterval::Hour(3),
    TimeInterval::Hour(6),
    TimeInterval::Hour(12),
    TimeInterval::Day(1),
    TimeInterval::Day(2),
    TimeInterval::Week(1),
    TimeInterval::Month(1),
    TimeInterval::Month(3),
];

impl TimeInterval {
    fn step(self) -> u32 {
        let step = match self {
            Self::Millisecond(n)
            | Self::Second(n)
            | Self::Minute(n)
            | Self::Hour(n)
            | Self::Day(n)
            | Self::Week(n)
            | Self::Month(n)
            | Self::Year(n) => n,
        };
        step.max(1)
    }

    fn fixed_unit_ms(self) -> Option<i64> {
        match self {
            Self::Millisecond(_) => Some(1),
            Self::Second(_) => Some(SECOND_MS),
            Self::Minute(_) => Some(MINUTE_MS),
            Self::Hour(_) => Some(HOUR_MS),
            Self::Day(_) => Some(DAY_MS),
            Self::Week(_) | Self::Month(_) | Self::Year(_) => None,
        }
    }

    /// Nominal length in milliseconds (months are 30 days, years 365).
    #[must_use]
    pub fn approx_millis(self) -> f64 {
        let unit = match self {
            Self::Week(_) => WEEK_MS,
            Self::Month(_) => 30 * DAY_MS,
            Self::Year(_) => 365 * DAY_MS,
            other => other.fixed_unit_ms().unwrap_or(1),
        };
        (unit * i64::from(self.step())) as f64
    }

    /// Latest interval boundary at or before `time`.
    pub fn floor(self, time: DateTime<Utc>) -> ChartResult<DateTime<Utc>> {
        let step = self.step();
        if let Some(unit) = self.fixed_unit_ms() {
            let span = unit * i64::from(step);
            let floored = time.timestamp_millis().div_euclid(span) * span;
            return from_millis(floored);
        }
        if let Self::Week(_) = self {
            let span = WEEK_MS * i64::from(step);
            let since = time.timestamp_millis() - FIRST_SUNDAY_MS;
            return from_millis(since.div_euclid(span) * span + FIRST_SUNDAY_MS);
        }

        let date = time.date_naive();
        let floored = match self {
            Self::Month(_) => {
                let month0 = date.month0() - date.month0() % step;
                NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1)
            }
            _ => {
                let year = date.year() - date.year().rem_euclid(step as i32);
                NaiveDate::from_ymd_opt(year, 1, 1)
            }
        };
        floored
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc())
            .ok_or_else(|| out_of_range(time))
    }

    /// Earliest interval boundary at or after `time`.
    pub fn ceil(self, time: DateTime<Utc>) -> ChartResult<DateTime<Utc>> {
        let floored = self.floor(time)?;
        if floored == time {
            Ok(floored)
        } else {
            self.offset(floored, 1)
        }
    }

    /// Advances `time` by `count` whole intervals.
    pub fn offset(self, time: DateTime<Utc>, count: u32) -> ChartResult<DateTime<Utc>> {
        let total = self.step().saturating_mul(count);
        let shifted = match self {
            Self::Week(_) => {
                time.checked_add_signed(chrono::Duration::milliseconds(WEEK_MS * i64::from(total)))
            }
            Self::Month(_) => time.checked_add_months(Months::new(total)),
            Self::Year(_) => time.checked_add_months(Months::new(total.saturating_mul(12))),
            other => {
                let unit = other.fixed_unit_ms().unwrap_or(1);
                time.checked_add_signed(chrono::Duration::milliseconds(unit * i64::from(total)))
            }
        };
        shifted.ok_or_else(|| out_of_range(time))
    }

    /// Boundaries in `[start, stop)`.
    pub fn range(self, start: DateTime<Utc>, stop: DateTime<Utc>) -> ChartResult<Vec<DateTime<Utc>>> {
        let mut out = Vec::new();
        let mut current = self.ceil(start)?;
        while current < stop {
            out.push(current);
            current = self.offset(current, 1)?;
        }
        Ok(out)
    }
}

fn from_millis(millis: i64) -> ChartResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        ChartError::InvalidData(format!("timestamp {millis} is out of the supported range"))
    })
}

fn out_of_range(time: DateTime<Utc>) -> ChartError {
    ChartError::InvalidData(format!("time interval arithmetic overflowed near {time}"))
}
