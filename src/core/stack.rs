use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::builder::build_nested_chart_data;
use crate::core::types::{Direction, InternalNestedPoint, InternalShallowPoint, NestedPoint, Value};
use crate::error::{ChartError, ChartResult};

/// Baseline policy for stacked layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StackOffset {
    /// Members stack on top of each other in series order.
    #[default]
    Default,
    /// Each group is normalized so its stack spans `[0, 1]`.
    Expand,
    /// Non-negative members stack upward from zero, negative members downward.
    /// Zero-valued members sit on the positive stack.
    Diverging,
}

/// Groups `series` by key and stacks each group's members along the value axis.
///
/// Each stacked point keeps `start` in `y0`/`x0` and the far edge of its
/// segment in `y1`/`x1` (and `y`/`x`). For negative diverging members the far
/// edge lies below the start.
pub fn build_stack_data(
    series: &[NestedPoint],
    offset: StackOffset,
    direction: Direction,
) -> ChartResult<Vec<InternalNestedPoint>> {
    let mut groups = build_nested_chart_data(series, false, direction)?;
    for group in &mut groups {
        stack_group(&mut group.data, offset, direction)?;
    }
    debug!(group_count = groups.len(), ?offset, ?direction, "build stack data");
    Ok(groups)
}

pub(crate) fn value_amount(point: &InternalShallowPoint, direction: Direction) -> ChartResult<f64> {
    let (start, end) = match direction {
        Direction::Vertical => (&point.y0, &point.y1),
        Direction::Horizontal => (&point.x0, &point.x1),
    };
    match (start.as_f64(), end.as_f64()) {
        (Some(start), Some(end)) if start.is_finite() && end.is_finite() => Ok(end - start),
        _ => Err(ChartError::InvalidData(format!(
            "stacked value for {} must be a finite number",
            point.key
        ))),
    }
}

fn stack_group(
    points: &mut [InternalShallowPoint],
    offset: StackOffset,
    direction: Direction,
) -> ChartResult<()> {
    let amounts = points
        .iter()
        .map(|point| value_amount(point, direction))
        .collect::<ChartResult<Vec<f64>>>()?;

    match offset {
        StackOffset::Default => {
            let mut cumulative = 0.0;
            for (point, amount) in points.iter_mut().zip(amounts) {
                let start = cumulative;
                cumulative += amount;
                set_span(point, direction, start, cumulative);
            }
        }
        StackOffset::Expand => {
            let total: f64 = amounts.iter().sum();
            let mut cumulative = 0.0;
            for (point, amount) in points.iter_mut().zip(amounts) {
                let share = if total == 0.0 { 0.0 } else { amount / total };
                let start = cumulative;
                cumulative += share;
                set_span(point, direction, start, cumulative);
            }
        }
        StackOffset::Diverging => {
            let mut positive = 0.0;
            let mut negative = 0.0;
            for (point, amount) in points.iter_mut().zip(amounts) {
                let running = if amount >= 0.0 { &mut positive } else { &mut negative };
                let start = *running;
                *running += amount;
                set_span(point, direction, start, *running);
            }
        }
    }
    Ok(())
}

fn set_span(point: &mut InternalShallowPoint, direction: Direction, start: f64, end: f64) {
    match direction {
        Direction::Vertical => {
            point.y0 = Value::Number(start);
            point.y1 = Value::Number(end);
            point.y = Value::Number(end);
        }
        Direction::Horizontal => {
            point.x0 = Value::Number(start);
            point.x1 = Value::Number(end);
            point.x = Value::Number(end);
        }
    }
}
