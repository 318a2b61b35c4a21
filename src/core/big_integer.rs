//! Big-integer normalization.
//!
//! Datasets may carry integers beyond `2^53 - 1` as [`Key::BigInt`]. Before such
//! values reach a scale they are divided by the smallest power of ten that
//! brings the series' largest magnitude back into the float-safe range, then
//! converted to `f64`. Division by a shared positive divisor keeps ordering;
//! values closer together than one divisor unit (or than `f64` resolution near
//! `2^53`) may collapse onto the same float.

use rust_decimal::Decimal;

use crate::core::primitives::decimal_to_f64;
use crate::core::types::{Key, NestedPoint, PointData, ShallowPoint, Value};
use crate::error::ChartResult;

pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Largest big-integer magnitude in a shallow series, or `None` when the
/// series holds no big integers.
#[must_use]
pub fn get_max_big_integer_for_shallow(series: &[ShallowPoint]) -> Option<Decimal> {
    series.iter().fold(None, |max, point| {
        point_keys(point).fold(max, |max, key| max_magnitude(max, key))
    })
}

/// Same as [`get_max_big_integer_for_shallow`], searching the points of every
/// series. Series keys are labels, not coordinates, and are not scanned.
#[must_use]
pub fn get_max_big_integer_for_nested(series: &[NestedPoint]) -> Option<Decimal> {
    series.iter().fold(None, |max, group| {
        match (max, get_max_big_integer_for_shallow(&group.data)) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    })
}

/// Divisor applied to big integers for a given maximum magnitude.
#[must_use]
pub fn big_integer_divisor(max_magnitude: Decimal) -> Decimal {
    let limit = Decimal::from(MAX_SAFE_INTEGER);
    let max_magnitude = max_magnitude.abs();
    let mut divisor = Decimal::ONE;
    while max_magnitude / divisor > limit {
        divisor *= Decimal::TEN;
    }
    divisor
}

/// Converts a raw key into a scale-ready value.
///
/// Plain numbers, strings and dates pass through. Big integers are scaled by
/// [`big_integer_divisor`] of `max_magnitude` (or of their own magnitude when
/// no maximum is known).
pub fn normalize_value(value: &Key, max_magnitude: Option<Decimal>) -> ChartResult<Value> {
    match value {
        Key::Number(n) => Ok(Value::Number(*n)),
        Key::Text(s) => Ok(Value::Text(s.clone())),
        Key::Date(d) => Ok(Value::Date(*d)),
        Key::BigInt(n) => {
            let divisor = big_integer_divisor(max_magnitude.unwrap_or(*n));
            decimal_to_f64(*n / divisor, "big integer").map(Value::Number)
        }
    }
}

/// Display form of a raw key. Big integers become their decimal string.
#[must_use]
pub fn normalize_value_for_formatting(value: &Key) -> Value {
    match value {
        Key::Number(n) => Value::Number(*n),
        Key::Text(s) => Value::Text(s.clone()),
        Key::Date(d) => Value::Date(*d),
        Key::BigInt(n) => Value::Text(n.to_string()),
    }
}

fn point_keys(point: &ShallowPoint) -> impl Iterator<Item = &Key> {
    let (first, second) = match &point.data {
        PointData::Scalar { value } => (value, None),
        PointData::Range { start, end } => (start, Some(end)),
    };
    std::iter::once(&point.key)
        .chain(std::iter::once(first))
        .chain(second)
}

fn max_magnitude(current: Option<Decimal>, key: &Key) -> Option<Decimal> {
    match key {
        Key::BigInt(n) => {
            let magnitude = n.abs();
            Some(current.map_or(magnitude, |c| c.max(magnitude)))
        }
        _ => current,
    }
}
