use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::scale::{LinearScale, tick_increment};
use crate::core::time_interval::{TICK_INTERVALS, TimeInterval};
use crate::error::ChartResult;

const YEAR_MS: f64 = 365.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Linear mapping over a UTC date domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    domain: (DateTime<Utc>, DateTime<Utc>),
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> ChartResult<Self> {
        let linear = LinearScale::new(
            (datetime_to_unix_millis(domain.0), datetime_to_unix_millis(domain.1)),
            range,
        )?;
        Ok(Self { domain, linear })
    }

    #[must_use]
    pub fn with_round(mut self, round: bool) -> Self {
        self.linear = self.linear.with_round(round);
        self
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn map(self, time: DateTime<Utc>) -> f64 {
        self.linear.map(datetime_to_unix_millis(time))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<DateTime<Utc>> {
        unix_millis_to_datetime(self.linear.invert(pixel))
    }

    /// Snaps the domain outward to the tick interval chosen for ten ticks.
    pub fn nice(self) -> ChartResult<Self> {
        let (start, stop) = self.ordered();
        let interval = tick_interval(start, stop, 10);
        let nice_start = interval.floor(start)?;
        let nice_stop = interval.ceil(stop)?;
        let domain = if self.domain.0 <= self.domain.1 {
            (nice_start, nice_stop)
        } else {
            (nice_stop, nice_start)
        };
        Ok(Self::new(domain, self.range())?.with_round(self.linear.is_round()))
    }

    pub fn ticks(self, count: usize) -> ChartResult<Vec<DateTime<Utc>>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let (start, stop) = self.ordered();
        let interval = tick_interval(start, stop, count);
        let mut out = interval.range(start, stop)?;
        if interval.floor(stop)? == stop {
            out.push(stop);
        }
        Ok(out)
    }

    fn ordered(self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (a, b) = self.domain;
        if a <= b { (a, b) } else { (b, a) }
    }
}

/// Chooses the tick interval whose length is closest to `span / count`.
#[must_use]
pub fn tick_interval(start: DateTime<Utc>, stop: DateTime<Utc>, count: usize) -> TimeInterval {
    let start_ms = datetime_to_unix_millis(start);
    let stop_ms = datetime_to_unix_millis(stop);
    let target = (stop_ms - start_ms).abs() / count.max(1) as f64;

    let upper = TICK_INTERVALS.partition_point(|interval| interval.approx_millis() <= target);
    if upper == TICK_INTERVALS.len() {
        let step = tick_increment(start_ms / YEAR_MS, stop_ms / YEAR_MS, count).max(1.0);
        return TimeInterval::Year(step as u32);
    }
    if upper == 0 {
        let step = tick_increment(start_ms, stop_ms, count).max(1.0);
        return TimeInterval::Millisecond(step as u32);
    }

    let below = TICK_INTERVALS[upper - 1];
    let above = TICK_INTERVALS[upper];
    if target / below.approx_millis() < above.approx_millis() / target {
        below
    } else {
        above
    }
}
