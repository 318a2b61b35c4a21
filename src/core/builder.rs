//! Normalization of caller datasets into internal points.
//!
//! Every builder derives four candidate coordinates per point: `k0`/`k1` on the
//! key axis and `v0`/`v1` on the value axis. `Direction::Vertical` assigns the
//! key axis to X and the value axis to Y; `Direction::Horizontal` swaps them.

use std::cmp::Reverse;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::big_integer::{
    get_max_big_integer_for_nested, get_max_big_integer_for_shallow, normalize_value,
    normalize_value_for_formatting,
};
use crate::core::primitives::unix_millis_to_datetime;
use crate::core::time_interval::TimeInterval;
use crate::core::types::{
    Direction, InternalNestedPoint, InternalShallowPoint, Key, NestedPoint, PointData,
    ShallowPoint, Value,
};
use crate::error::{ChartError, ChartResult};

/// Width of a key-axis bucket.
///
/// When a builder receives a bin size, each point spans `[key, key + size]` on
/// the key axis instead of starting at the zero baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "size", rename_all = "snake_case")]
pub enum BinSize {
    /// Numeric width; added as milliseconds to date keys.
    Numeric(f64),
    Interval(TimeInterval),
}

impl BinSize {
    fn offset(self, key: &Value) -> ChartResult<Value> {
        match (self, key) {
            (Self::Numeric(size), Value::Number(n)) => Ok(Value::Number(n + size)),
            (Self::Numeric(size), Value::Date(d)) => {
                let millis = d.timestamp_millis() as f64 + size;
                unix_millis_to_datetime(millis).map(Value::Date)
            }
            (Self::Interval(interval), Value::Date(d)) => interval.offset(*d, 1).map(Value::Date),
            (_, other) => Err(ChartError::InvalidData(format!(
                "bin size {self:?} cannot be applied to key {other}"
            ))),
        }
    }
}

struct Coordinates {
    key: Value,
    k0: Value,
    k1: Value,
    v0: Value,
    v1: Value,
}

impl Coordinates {
    fn new(key: Value, bin_size: Option<BinSize>, v0: Value, v1: Value) -> ChartResult<Self> {
        let (k0, k1) = match bin_size {
            Some(size) => (key.clone(), size.offset(&key)?),
            None => (Value::zero(), key.clone()),
        };
        Ok(Self { key, k0, k1, v0, v1 })
    }

    fn place(
        self,
        direction: Direction,
        key: Value,
        value: Value,
        meta: Option<serde_json::Value>,
        id: Option<String>,
    ) -> InternalShallowPoint {
        let Self { key: k, k0, k1, v0, v1 } = self;
        match direction {
            Direction::Vertical => InternalShallowPoint {
                key,
                value,
                x: k,
                x0: k0,
                x1: k1,
                y: v1.clone(),
                y0: v0,
                y1: v1,
                meta,
                id,
            },
            Direction::Horizontal => InternalShallowPoint {
                key,
                value,
                x: v1.clone(),
                x0: v0,
                x1: v1,
                y: k,
                y0: k0,
                y1: k1,
                meta,
                id,
            },
        }
    }
}

fn value_bounds(data: &PointData, max: Option<Decimal>) -> ChartResult<(Value, Value)> {
    match data {
        PointData::Scalar { value } => Ok((Value::zero(), normalize_value(value, max)?)),
        PointData::Range { start, end } => {
            Ok((normalize_value(start, max)?, normalize_value(end, max)?))
        }
    }
}

fn build_point(
    point: &ShallowPoint,
    series_key: Option<&Key>,
    direction: Direction,
    bin_size: Option<BinSize>,
    max: Option<Decimal>,
) -> ChartResult<InternalShallowPoint> {
    let (v0, v1) = value_bounds(&point.data, max)?;
    let coordinates = Coordinates::new(normalize_value(&point.key, max)?, bin_size, v0, v1)?;
    let key = normalize_value_for_formatting(series_key.unwrap_or(&point.key));
    Ok(coordinates.place(
        direction,
        key,
        normalize_value_for_formatting(point.data.end()),
        point.meta.clone(),
        point.id.clone(),
    ))
}

/// Normalizes a single series. Output order matches input order.
pub fn build_shallow_chart_data(
    series: &[ShallowPoint],
    direction: Direction,
    bin_size: Option<BinSize>,
) -> ChartResult<Vec<InternalShallowPoint>> {
    let max = get_max_big_integer_for_shallow(series);
    let result = series
        .iter()
        .map(|point| build_point(point, None, direction, bin_size, max))
        .collect::<ChartResult<Vec<_>>>()?;
    trace!(count = result.len(), ?direction, "build shallow chart data");
    Ok(result)
}

/// Regroups "series -> points" into "key -> one point per series".
///
/// Groups appear in first-seen order of the inner keys. Each point inside a
/// group carries its series key as `key`, and inherits the series `meta`/`id`
/// when it has none of its own. Groups themselves carry no `meta`/`id`. With `sort`, groups are ordered by
/// descending median of their value-axis coordinate; equal medians keep
/// first-seen order.
pub fn build_nested_chart_data(
    series: &[NestedPoint],
    sort: bool,
    direction: Direction,
) -> ChartResult<Vec<InternalNestedPoint>> {
    let max = get_max_big_integer_for_nested(series);
    let mut groups: IndexMap<Value, InternalNestedPoint> = IndexMap::new();

    for outer in series {
        for inner in &outer.data {
            let mut point = build_point(inner, Some(&outer.key), direction, None, max)?;
            if point.meta.is_none() {
                point.meta.clone_from(&outer.meta);
            }
            if point.id.is_none() {
                point.id.clone_from(&outer.id);
            }
            let group_key = normalize_value_for_formatting(&inner.key);
            groups
                .entry(group_key.clone())
                .or_insert_with(|| InternalNestedPoint {
                    key: group_key,
                    data: Vec::new(),
                    meta: None,
                    id: None,
                })
                .data
                .push(point);
        }
    }

    let mut result: Vec<InternalNestedPoint> = groups.into_values().collect();
    if sort {
        result.sort_by_cached_key(|group| Reverse(OrderedFloat(group_median(group, direction))));
    }

    debug!(
        series_count = series.len(),
        group_count = result.len(),
        sort,
        ?direction,
        "build nested chart data"
    );
    Ok(result)
}

fn group_median(group: &InternalNestedPoint, direction: Direction) -> f64 {
    let mut values: SmallVec<[f64; 16]> = group
        .data
        .iter()
        .filter_map(|point| match direction {
            Direction::Vertical => point.y1.as_f64(),
            Direction::Horizontal => point.x1.as_f64(),
        })
        .filter(|v| !v.is_nan())
        .collect();
    median(&mut values).unwrap_or(f64::NEG_INFINITY)
}

pub(crate) fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) * 0.5)
    } else {
        Some(values[mid])
    }
}

/// Running-total layout across the whole series.
///
/// Point `i` spans from the sum of all earlier values to that sum plus its
/// own value; the first point starts at zero.
pub fn build_waterfall(
    series: &[ShallowPoint],
    direction: Direction,
    bin_size: Option<BinSize>,
) -> ChartResult<Vec<InternalShallowPoint>> {
    let max = get_max_big_integer_for_shallow(series);
    let mut cumulative = 0.0;
    let mut result = Vec::with_capacity(series.len());

    for point in series {
        let amount = normalize_value(point.data.end(), max)?
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                ChartError::InvalidData("waterfall values must be finite numbers".to_owned())
            })?;
        let start = cumulative;
        cumulative += amount;

        let coordinates = Coordinates::new(
            normalize_value(&point.key, max)?,
            bin_size,
            Value::Number(start),
            Value::Number(cumulative),
        )?;
        result.push(coordinates.place(
            direction,
            normalize_value_for_formatting(&point.key),
            normalize_value_for_formatting(point.data.end()),
            point.meta.clone(),
            point.id.clone(),
        ));
    }

    trace!(count = result.len(), total = cumulative, "build waterfall data");
    Ok(result)
}
