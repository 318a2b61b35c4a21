use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{
    Field, FieldAccess, InternalData, InternalNestedPoint, InternalShallowPoint, PointCollection,
    Value,
};
use crate::error::{ChartError, ChartResult};

/// Domain of a continuous axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContinuousDomain {
    Numeric { min: f64, max: f64 },
    Time { min: DateTime<Utc>, max: DateTime<Utc> },
}

impl ContinuousDomain {
    #[must_use]
    pub fn numeric(min: f64, max: f64) -> Self {
        Self::Numeric { min, max }
    }

    #[must_use]
    pub fn time(min: DateTime<Utc>, max: DateTime<Utc>) -> Self {
        Self::Time { min, max }
    }

    /// Bounds as plain numbers; time domains use epoch milliseconds.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Numeric { min, max } => (min, max),
            Self::Time { min, max } => (min.timestamp_millis() as f64, max.timestamp_millis() as f64),
        }
    }

    #[must_use]
    pub fn is_time(self) -> bool {
        matches!(self, Self::Time { .. })
    }
}

/// Explicit domain override accepted by the scale factories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "domain", rename_all = "snake_case")]
pub enum ScaleDomain {
    Continuous(ContinuousDomain),
    Categorical(Vec<Value>),
}

/// `[min, max]` of `field` across every leaf point.
///
/// Values of a different kind than the first comparable one, and `NaN`, are
/// skipped. Returns `None` for empty data.
pub fn extent<D: PointCollection + ?Sized>(data: &D, field: Field) -> Option<(Value, Value)> {
    let mut bounds: Option<(Value, Value)> = None;
    data.for_each_point(|point| {
        let value = point.field(field);
        match &mut bounds {
            None => {
                if value.compare(value).is_some() {
                    bounds = Some((value.clone(), value.clone()));
                }
            }
            Some((min, max)) => {
                if value.compare(min) == Some(Ordering::Less) {
                    *min = value.clone();
                }
                if value.compare(max) == Some(Ordering::Greater) {
                    *max = value.clone();
                }
            }
        }
    });
    bounds
}

fn numeric_extent<D: PointCollection + ?Sized>(data: &D, field: Field) -> Option<(f64, f64)> {
    let (min, max) = extent(data, field)?;
    Some((min.as_f64()?, max.as_f64()?))
}

fn time_extent<D: PointCollection + ?Sized>(data: &D, field: Field) -> Option<ContinuousDomain> {
    match extent(data, field)? {
        (Value::Date(min), Value::Date(max)) => Some(ContinuousDomain::time(min, max)),
        _ => None,
    }
}

/// Value-axis domain for vertical layouts.
///
/// Negative data yields a symmetric domain around zero; otherwise the domain
/// starts at zero unless `scaled` asks for a data-relative start.
pub fn get_y_domain<D: PointCollection + ?Sized>(data: &D, scaled: bool) -> ContinuousDomain {
    if let Some(domain) = time_extent(data, Field::Y1) {
        return domain;
    }

    let min_y = numeric_extent(data, Field::Y).map_or(0.0, |(min, _)| min);
    let (min_y1, max_y1) = numeric_extent(data, Field::Y1).unwrap_or((0.0, 0.0));

    if min_y < 0.0 {
        let max_abs = min_y.abs().max(max_y1);
        ContinuousDomain::numeric(-max_abs, max_abs)
    } else if scaled {
        ContinuousDomain::numeric(min_y1, max_y1)
    } else {
        ContinuousDomain::numeric(0.0, max_y1)
    }
}

/// Key-axis domain for continuous X axes.
///
/// Date domains are never zero-based. Numeric domains start at zero unless
/// `scaled`; `is_diverging` makes them symmetric around zero.
pub fn get_x_domain<D: PointCollection + ?Sized>(
    data: &D,
    scaled: bool,
    is_diverging: bool,
) -> ContinuousDomain {
    if let Some(domain) = time_extent(data, Field::X) {
        return domain;
    }

    let (min_x, max_x) = numeric_extent(data, Field::X).unwrap_or((0.0, 0.0));
    if is_diverging {
        let max_abs = min_x.abs().max(max_x.abs());
        ContinuousDomain::numeric(-max_abs, max_abs)
    } else if scaled {
        ContinuousDomain::numeric(min_x, max_x)
    } else {
        ContinuousDomain::numeric(0.0, max_x)
    }
}

/// Distinct values of `field`, in first-seen order.
#[must_use]
pub fn get_group_domain<T: FieldAccess>(data: &[T], field: Field) -> Vec<Value> {
    data.iter()
        .filter_map(|item| item.field_value(field))
        .cloned()
        .collect::<IndexSet<Value>>()
        .into_iter()
        .collect()
}

/// Distinct values of `field` across every group's points, in first-seen order.
#[must_use]
pub fn get_deep_group_domain(data: &[InternalNestedPoint], field: Field) -> Vec<Value> {
    data.iter()
        .flat_map(|group| group.data.iter().map(move |point| point.field(field)))
        .cloned()
        .collect::<IndexSet<Value>>()
        .into_iter()
        .collect()
}

/// Step of a [`unique_by`] traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessor {
    /// Descend into a nested point's `data`.
    Children,
    /// Read a field at this depth.
    Field(Field),
}

/// Collects distinct values by walking `data` with one accessor per depth.
///
/// Fails with [`ChartError::MissingAccessor`] when the data is deeper than the
/// accessor list.
pub fn unique_by(data: &InternalData, accessors: &[Accessor]) -> ChartResult<Vec<Value>> {
    let mut out = IndexSet::new();
    match data {
        InternalData::Shallow(points) => collect_shallow(points, accessors, 0, &mut out)?,
        InternalData::Nested(groups) => {
            let accessor = accessors.first().ok_or(ChartError::MissingAccessor { depth: 0 })?;
            for group in groups {
                match accessor {
                    Accessor::Children => collect_shallow(&group.data, accessors, 1, &mut out)?,
                    Accessor::Field(field) => {
                        let value = group.field_value(*field).ok_or_else(|| {
                            ChartError::InvalidData(format!(
                                "nested points do not expose {field:?} at depth 0"
                            ))
                        })?;
                        out.insert(value.clone());
                    }
                }
            }
        }
    }
    Ok(out.into_iter().collect())
}

fn collect_shallow(
    points: &[InternalShallowPoint],
    accessors: &[Accessor],
    depth: usize,
    out: &mut IndexSet<Value>,
) -> ChartResult<()> {
    let accessor = accessors.get(depth).ok_or(ChartError::MissingAccessor { depth })?;
    let Accessor::Field(field) = accessor else {
        return Err(ChartError::InvalidData(format!(
            "shallow points have no children at depth {depth}"
        )));
    };
    out.extend(points.iter().map(|point| point.field(*field).clone()));
    Ok(())
}
