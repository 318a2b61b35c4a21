use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Layout direction shared by every builder.
///
/// `Vertical` places keys on the X axis and values on the Y axis;
/// `Horizontal` swaps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// Raw value supplied by the caller for keys and data.
///
/// `BigInt` holds integers that may exceed the float-safe range. It is
/// resolved to a plain number by the builders and never reaches a scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Key {
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
    BigInt(Decimal),
}

impl Key {
    /// Builds a big-integer key from an `i128`.
    pub fn big_int(value: i128) -> ChartResult<Self> {
        Decimal::try_from_i128_with_scale(value, 0)
            .map(Self::BigInt)
            .map_err(|e| ChartError::InvalidData(format!("big integer out of range: {e}")))
    }

    #[must_use]
    pub fn is_big_int(&self) -> bool {
        matches!(self, Self::BigInt(_))
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for Key {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Decimal> for Key {
    fn from(value: Decimal) -> Self {
        Self::BigInt(value.trunc())
    }
}

/// Normalized, scale-ready value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
}

impl Value {
    #[must_use]
    pub fn zero() -> Self {
        Self::Number(0.0)
    }

    /// Numeric view used by continuous scales. Dates map to epoch milliseconds.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Date(d) => Some(d.timestamp_millis() as f64),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Orders two values of the same kind. Dates compare by instant, never
    /// by their textual form. Mixed kinds and `NaN` are unordered.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Number(n) => OrderedFloat(*n).hash(state),
            Self::Text(s) => s.hash(state),
            Self::Date(d) => d.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => f.write_str(&d.to_rfc3339()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Payload of a shallow point: a single value or a `[start, end]` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointData {
    Scalar { value: Key },
    Range { start: Key, end: Key },
}

impl PointData {
    /// The value that positions the point on the value axis.
    #[must_use]
    pub fn end(&self) -> &Key {
        match self {
            Self::Scalar { value } => value,
            Self::Range { end, .. } => end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShallowPoint {
    pub key: Key,
    pub data: PointData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ShallowPoint {
    #[must_use]
    pub fn scalar(key: impl Into<Key>, value: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            data: PointData::Scalar {
                value: value.into(),
            },
            meta: None,
            id: None,
        }
    }

    #[must_use]
    pub fn range(key: impl Into<Key>, start: impl Into<Key>, end: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            data: PointData::Range {
                start: start.into(),
                end: end.into(),
            },
            meta: None,
            id: None,
        }
    }

    #[must_use]
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A named series holding its own shallow points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedPoint {
    pub key: Key,
    pub data: Vec<ShallowPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl NestedPoint {
    #[must_use]
    pub fn new(key: impl Into<Key>, data: Vec<ShallowPoint>) -> Self {
        Self {
            key: key.into(),
            data,
            meta: None,
            id: None,
        }
    }

    #[must_use]
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A caller-supplied dataset, single- or multi-series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "points", rename_all = "snake_case")]
pub enum ChartData {
    Shallow(Vec<ShallowPoint>),
    Nested(Vec<NestedPoint>),
}

/// Normalized point consumed by scales and renderers.
///
/// `key` and `value` keep the display form of the input; the six
/// coordinates hold scale-ready values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalShallowPoint {
    pub key: Value,
    pub value: Value,
    pub x: Value,
    pub x0: Value,
    pub x1: Value,
    pub y: Value,
    pub y0: Value,
    pub y1: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl InternalShallowPoint {
    #[must_use]
    pub fn field(&self, field: Field) -> &Value {
        match field {
            Field::Key => &self.key,
            Field::Value => &self.value,
            Field::X => &self.x,
            Field::X0 => &self.x0,
            Field::X1 => &self.x1,
            Field::Y => &self.y,
            Field::Y0 => &self.y0,
            Field::Y1 => &self.y1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalNestedPoint {
    pub key: Value,
    pub data: Vec<InternalShallowPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "points", rename_all = "snake_case")]
pub enum InternalData {
    Shallow(Vec<InternalShallowPoint>),
    Nested(Vec<InternalNestedPoint>),
}

/// Attribute selector for extents and group domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Key,
    Value,
    X,
    X0,
    X1,
    Y,
    Y0,
    Y1,
}

/// Attribute lookup shared by shallow and nested points.
///
/// Nested points only expose `Field::Key`.
pub trait FieldAccess {
    fn field_value(&self, field: Field) -> Option<&Value>;
}

impl FieldAccess for InternalShallowPoint {
    fn field_value(&self, field: Field) -> Option<&Value> {
        Some(self.field(field))
    }
}

impl FieldAccess for InternalNestedPoint {
    fn field_value(&self, field: Field) -> Option<&Value> {
        match field {
            Field::Key => Some(&self.key),
            _ => None,
        }
    }
}

/// Visits every leaf point, descending one level into nested data.
pub trait PointCollection {
    fn for_each_point<F: FnMut(&InternalShallowPoint)>(&self, f: F);
}

impl PointCollection for [InternalShallowPoint] {
    fn for_each_point<F: FnMut(&InternalShallowPoint)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

impl PointCollection for [InternalNestedPoint] {
    fn for_each_point<F: FnMut(&InternalShallowPoint)>(&self, mut f: F) {
        for group in self {
            group.data.iter().for_each(&mut f);
        }
    }
}

impl PointCollection for InternalData {
    fn for_each_point<F: FnMut(&InternalShallowPoint)>(&self, f: F) {
        match self {
            Self::Shallow(points) => points.as_slice().for_each_point(f),
            Self::Nested(groups) => groups.as_slice().for_each_point(f),
        }
    }
}
