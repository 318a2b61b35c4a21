//! Marimekko layout: group widths proportional to group totals, member
//! heights proportional to their share of the group.

use indexmap::IndexMap;
use tracing::debug;

use crate::core::builder::build_nested_chart_data;
use crate::core::scale::LinearScale;
use crate::core::stack::value_amount;
use crate::core::types::{Direction, InternalNestedPoint, NestedPoint, Value};
use crate::error::{ChartError, ChartResult};

/// Builds the dual-proportional layout.
///
/// Every member point of group `g` carries `x0`/`x1` as the cumulative share
/// of the grand total covered before and after `g` (in `[0, 1]`), `x` as the
/// group key, and `y0`/`y1` as its cumulative share within `g`.
pub fn build_marimekko_data(series: &[NestedPoint]) -> ChartResult<Vec<InternalNestedPoint>> {
    let mut groups = build_nested_chart_data(series, false, Direction::Vertical)?;

    let amounts = groups
        .iter()
        .map(|group| {
            group
                .data
                .iter()
                .map(|point| value_amount(point, Direction::Vertical))
                .collect::<ChartResult<Vec<f64>>>()
        })
        .collect::<ChartResult<Vec<_>>>()?;
    let totals: Vec<f64> = amounts.iter().map(|a| a.iter().sum()).collect();
    let grand_total: f64 = totals.iter().sum();

    let mut offset = 0.0;
    for ((group, amounts), total) in groups.iter_mut().zip(&amounts).zip(&totals) {
        let x0 = share(offset, grand_total);
        offset += total;
        let x1 = share(offset, grand_total);

        let mut inner = 0.0;
        for (point, amount) in group.data.iter_mut().zip(amounts) {
            let y0 = share(inner, *total);
            inner += amount;
            let y1 = share(inner, *total);

            point.x = group.key.clone();
            point.x0 = Value::Number(x0);
            point.x1 = Value::Number(x1);
            point.y = Value::Number(y1);
            point.y0 = Value::Number(y0);
            point.y1 = Value::Number(y1);
        }
    }

    debug!(group_count = groups.len(), grand_total, "build marimekko data");
    Ok(groups)
}

fn share(part: f64, total: f64) -> f64 {
    if total == 0.0 { 0.0 } else { part / total }
}

/// Linear scale from a `[0, 1]` share to `[0, width]` pixels.
pub fn get_marimekko_scale(width: f64, round_domains: bool) -> ChartResult<LinearScale> {
    let scale = LinearScale::new((0.0, 1.0), (0.0, width))?.with_round(true);
    Ok(if round_domains { scale.nice(10) } else { scale })
}

/// Variable-width categorical scale for Marimekko groups.
#[derive(Debug, Clone, PartialEq)]
pub struct MarimekkoScale {
    bands: IndexMap<Value, (f64, f64)>,
    range: (f64, f64),
}

impl MarimekkoScale {
    /// Start of the group's band.
    #[must_use]
    pub fn map(&self, key: &Value) -> Option<f64> {
        self.bands.get(key).map(|&(offset, _)| offset)
    }

    /// Width of the group's band.
    #[must_use]
    pub fn bandwidth(&self, key: &Value) -> Option<f64> {
        self.bands.get(key).map(|&(_, width)| width)
    }

    pub fn domain(&self) -> impl Iterator<Item = &Value> {
        self.bands.keys()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Places Marimekko groups using their width shares and a fixed pixel gap.
///
/// Widths are shrunk by `(range - padding * (n - 1)) / range` so that the
/// gaps fit inside the range. Horizontal layouts are rejected.
pub fn get_marimekko_group_scale(
    data: &[InternalNestedPoint],
    direction: Direction,
    value_scale: LinearScale,
    padding: f64,
) -> ChartResult<MarimekkoScale> {
    if !direction.is_vertical() {
        return Err(ChartError::UnsupportedLayout(
            "marimekko charts do not support horizontal layouts".to_owned(),
        ));
    }
    if !padding.is_finite() || padding < 0.0 {
        return Err(ChartError::InvalidData(
            "marimekko padding must be finite and >= 0".to_owned(),
        ));
    }

    let (r0, r1) = value_scale.range();
    let total_range = (r1 - r0).abs();
    let gaps = padding * data.len().saturating_sub(1) as f64;
    let multiplier = if total_range > 0.0 {
        ((total_range - gaps) / total_range).max(0.0)
    } else {
        0.0
    };

    let mut bands = IndexMap::with_capacity(data.len());
    let mut previous_end = 0.0;
    for (index, group) in data.iter().enumerate() {
        let (share_start, share_end) = group
            .data
            .first()
            .and_then(|point| Some((point.x0.as_f64()?, point.x1.as_f64()?)))
            .unwrap_or((previous_end, previous_end));
        previous_end = share_end;

        let start = value_scale.map(share_start) - r0;
        let width = value_scale.map(share_end) - value_scale.map(share_start);
        let offset = start * multiplier + index as f64 * padding;
        bands.insert(group.key.clone(), (r0 + offset, width * multiplier));
    }

    Ok(MarimekkoScale {
        bands,
        range: (r0, r1),
    })
}
