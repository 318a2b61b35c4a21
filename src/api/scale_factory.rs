use tracing::debug;

use crate::core::band_scale::BandScale;
use crate::core::domains::{
    ContinuousDomain, ScaleDomain, get_deep_group_domain, get_group_domain, get_x_domain,
    get_y_domain,
};
use crate::core::primitives::unix_millis_to_datetime;
use crate::core::radial::full_turn;
use crate::core::scale::LinearScale;
use crate::core::time_scale::TimeScale;
use crate::core::types::{Field, InternalData, Value};
use crate::error::{ChartError, ChartResult};

use super::axis_config::{AxisScaleConfig, AxisType};

/// Tick count used when snapping continuous domains.
pub const NICE_TICK_COUNT: usize = 10;

/// Scale produced by the axis factories.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartScale {
    Linear(LinearScale),
    Time(TimeScale),
    Band(BandScale),
}

impl ChartScale {
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::Time(_) => "time",
            Self::Band(_) => "band",
        }
    }

    #[must_use]
    pub fn is_band(&self) -> bool {
        matches!(self, Self::Band(_))
    }

    /// Pixel position of `value`; `None` when the value does not fit the scale.
    ///
    /// Linear scales read dates as epoch milliseconds and time scales read
    /// numbers the same way.
    #[must_use]
    pub fn map(&self, value: &Value) -> Option<f64> {
        match self {
            Self::Linear(scale) => value.as_f64().map(|v| scale.map(v)),
            Self::Time(scale) => match value {
                Value::Date(time) => Some(scale.map(*time)),
                Value::Number(millis) => unix_millis_to_datetime(*millis)
                    .ok()
                    .map(|time| scale.map(time)),
                Value::Text(_) => None,
            },
            Self::Band(scale) => scale.map(value),
        }
    }

    /// Domain value at `pixel`. Band scales return the band containing it.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> Option<Value> {
        match self {
            Self::Linear(scale) => Some(Value::Number(scale.invert(pixel))),
            Self::Time(scale) => scale.invert(pixel).ok().map(Value::Date),
            Self::Band(scale) => scale.invert(pixel).cloned(),
        }
    }

    #[must_use]
    pub fn domain(&self) -> ScaleDomain {
        match self {
            Self::Linear(scale) => {
                let (min, max) = scale.domain();
                ScaleDomain::Continuous(ContinuousDomain::numeric(min, max))
            }
            Self::Time(scale) => {
                let (min, max) = scale.domain();
                ScaleDomain::Continuous(ContinuousDomain::time(min, max))
            }
            Self::Band(scale) => ScaleDomain::Categorical(scale.domain().iter().cloned().collect()),
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.range(),
            Self::Time(scale) => scale.range(),
            Self::Band(scale) => scale.range(),
        }
    }

    /// Band width; continuous scales have none.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        match self {
            Self::Band(scale) => scale.bandwidth(),
            Self::Linear(_) | Self::Time(_) => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Key-axis scale spanning `[0, width]` pixels.
pub fn get_x_scale(
    config: &AxisScaleConfig,
    data: &InternalData,
    width: f64,
) -> ChartResult<ChartScale> {
    let scale = build_scale(config, data, Axis::X, (0.0, width), true)?;
    debug!(kind = scale.kind_name(), width, "build x scale");
    Ok(scale)
}

/// Value-axis scale. Continuous scales run from `height` at the bottom to
/// `0` at the top; band scales run top-down over `[0, height]`.
pub fn get_y_scale(
    config: &AxisScaleConfig,
    data: &InternalData,
    height: f64,
) -> ChartResult<ChartScale> {
    let range = if config.axis_type.is_continuous() {
        (height, 0.0)
    } else {
        (0.0, height)
    };
    let scale = build_scale(config, data, Axis::Y, range, true)?;
    debug!(kind = scale.kind_name(), height, "build y scale");
    Ok(scale)
}

/// Angular key scale covering a full turn, for radial charts.
pub fn get_radial_x_scale(config: &AxisScaleConfig, data: &InternalData) -> ChartResult<ChartScale> {
    let scale = build_scale(config, data, Axis::X, full_turn(), false)?;
    debug!(kind = scale.kind_name(), "build radial x scale");
    Ok(scale)
}

/// Thickness of a bar drawn on `scale`.
///
/// Band scales use their bandwidth unless `size_override` is given. Continuous
/// scales split their range evenly across `count` bars and reject overrides.
pub fn resolve_band_size(
    scale: &ChartScale,
    count: usize,
    size_override: Option<f64>,
) -> ChartResult<f64> {
    if let Some(size) = size_override {
        if !size.is_finite() || size < 0.0 {
            return Err(ChartError::InvalidData(
                "bar size override must be finite and >= 0".to_owned(),
            ));
        }
        return match scale {
            ChartScale::Band(_) => Ok(size),
            other => Err(ChartError::UnsupportedScale(format!(
                "bar size override requires a band scale, got a {} scale",
                other.kind_name()
            ))),
        };
    }

    Ok(match scale {
        ChartScale::Band(band) => band.bandwidth(),
        _ if count == 0 => 0.0,
        other => {
            let (r0, r1) = other.range();
            (r1 - r0).abs() / count as f64
        }
    })
}

fn build_scale(
    config: &AxisScaleConfig,
    data: &InternalData,
    axis: Axis,
    range: (f64, f64),
    round: bool,
) -> ChartResult<ChartScale> {
    config.validate()?;
    if !range.0.is_finite() || !range.1.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    match config.axis_type {
        AxisType::Category => {
            let domain = match &config.domain {
                Some(ScaleDomain::Categorical(values)) => values.clone(),
                _ => categorical_domain(data, axis, config.is_multi_series),
            };
            Ok(ChartScale::Band(
                BandScale::new(domain, range)
                    .with_round(round)
                    .with_padding_inner(config.band_padding()),
            ))
        }
        AxisType::Time => {
            let domain = match continuous_domain(config, data, axis) {
                ContinuousDomain::Time { min, max } => (min, max),
                ContinuousDomain::Numeric { min, max } => {
                    (unix_millis_to_datetime(min)?, unix_millis_to_datetime(max)?)
                }
            };
            let scale = TimeScale::new(domain, range)?.with_round(round);
            Ok(ChartScale::Time(if config.round_domains {
                scale.nice()?
            } else {
                scale
            }))
        }
        AxisType::Value | AxisType::Duration => {
            let scale =
                LinearScale::new(continuous_domain(config, data, axis).bounds(), range)?
                    .with_round(round);
            Ok(ChartScale::Linear(if config.round_domains {
                scale.nice(NICE_TICK_COUNT)
            } else {
                scale
            }))
        }
    }
}

fn continuous_domain(config: &AxisScaleConfig, data: &InternalData, axis: Axis) -> ContinuousDomain {
    if let Some(ScaleDomain::Continuous(domain)) = &config.domain {
        return *domain;
    }
    match axis {
        Axis::X => get_x_domain(data, config.scaled, config.is_diverging),
        Axis::Y => get_y_domain(data, config.scaled),
    }
}

fn categorical_domain(data: &InternalData, axis: Axis, is_multi_series: bool) -> Vec<Value> {
    let field = match (is_multi_series, axis) {
        (true, _) => Field::Key,
        (false, Axis::X) => Field::X,
        (false, Axis::Y) => Field::Y,
    };
    match data {
        InternalData::Shallow(points) => get_group_domain(points, field),
        InternalData::Nested(groups) if is_multi_series => get_group_domain(groups, Field::Key),
        InternalData::Nested(groups) => get_deep_group_domain(groups, field),
    }
}
