//! Histogram binning over a continuous key axis.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::domains::{ContinuousDomain, get_group_domain};
use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::scale::ticks;
use crate::core::time_interval::TimeInterval;
use crate::core::types::{Field, InternalShallowPoint, Value};
use crate::error::{ChartError, ChartResult};

/// How bucket boundaries are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Thresholds {
    /// Approximate bucket count; boundaries fall on round tick values.
    Count(usize),
    /// Explicit boundaries, in key units (epoch milliseconds for dates).
    Values(Vec<f64>),
    /// Calendar boundaries; requires a time domain.
    Interval(TimeInterval),
}

/// What a bucket reports as its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BinAggregate {
    /// Number of points in the bucket.
    #[default]
    Count,
    /// Sum of the points' `y1` values.
    Sum,
}

/// Buckets `data` by its `x` coordinate over `domain`.
///
/// Each output point spans `[x0, x1)` on the key axis (the last bucket is
/// closed) and `[0, aggregate]` on the value axis. Points outside the domain
/// are dropped.
pub fn build_bins(
    domain: ContinuousDomain,
    thresholds: &Thresholds,
    data: &[InternalShallowPoint],
    aggregate: BinAggregate,
) -> ChartResult<Vec<InternalShallowPoint>> {
    let (lo, hi) = domain.bounds();
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

    let mut bounds = match thresholds {
        Thresholds::Count(count) => {
            let mut tz = ticks(lo, hi, *count);
            if tz.last().is_some_and(|&last| last >= hi) {
                tz.pop();
            }
            tz
        }
        Thresholds::Values(values) => {
            let mut tz: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
            tz.sort_by(f64::total_cmp);
            tz
        }
        Thresholds::Interval(interval) => match domain {
            ContinuousDomain::Time { .. } => interval
                .range(unix_millis_to_datetime(lo)?, unix_millis_to_datetime(hi)?)?
                .into_iter()
                .map(datetime_to_unix_millis)
                .collect(),
            ContinuousDomain::Numeric { .. } => {
                return Err(ChartError::InvalidData(
                    "interval thresholds require a time domain".to_owned(),
                ));
            }
        },
    };
    bounds.retain(|&t| t > lo && t <= hi);

    let mut totals = vec![0.0; bounds.len() + 1];
    for point in data {
        let Some(x) = point.x.as_f64().filter(|x| !x.is_nan()) else {
            continue;
        };
        if x < lo || x > hi {
            continue;
        }
        let index = bounds.partition_point(|&t| t <= x);
        totals[index] += match aggregate {
            BinAggregate::Count => 1.0,
            BinAggregate::Sum => point.y1.as_f64().ok_or_else(|| {
                ChartError::InvalidData(format!("bin value for {} must be numeric", point.key))
            })?,
        };
    }

    let as_key = |v: f64| -> ChartResult<Value> {
        if domain.is_time() {
            unix_millis_to_datetime(v).map(Value::Date)
        } else {
            Ok(Value::Number(v))
        }
    };

    let mut bins = Vec::with_capacity(totals.len());
    for (index, total) in totals.into_iter().enumerate() {
        let start = if index == 0 { lo } else { bounds[index - 1] };
        let end = bounds.get(index).copied().unwrap_or(hi);
        let x0 = as_key(start)?;
        bins.push(InternalShallowPoint {
            key: x0.clone(),
            value: Value::Number(total),
            x: x0.clone(),
            x0,
            x1: as_key(end)?,
            y: Value::Number(total),
            y0: Value::zero(),
            y1: Value::Number(total),
            meta: None,
            id: None,
        });
    }

    trace!(bin_count = bins.len(), ?aggregate, "build bins");
    Ok(bins)
}

/// Bucket start values, used as the categorical domain of a histogram axis.
#[must_use]
pub fn bin_domain(bins: &[InternalShallowPoint]) -> Vec<Value> {
    get_group_domain(bins, Field::X0)
}
