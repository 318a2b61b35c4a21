use serde::{Deserialize, Serialize};

use crate::core::domains::{ContinuousDomain, ScaleDomain};
use crate::error::{ChartError, ChartResult};

/// Kind of axis a scale is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AxisType {
    /// Discrete keys placed in equal bands.
    Category,
    /// Continuous numbers.
    #[default]
    Value,
    /// Continuous UTC dates.
    Time,
    /// Continuous numbers measuring elapsed time.
    Duration,
}

impl AxisType {
    #[must_use]
    pub fn is_continuous(self) -> bool {
        !matches!(self, Self::Category)
    }
}

/// Axis configuration consumed by the scale factories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisScaleConfig {
    pub axis_type: AxisType,
    /// Snap continuous domains to round values.
    pub round_domains: bool,
    /// Replaces the domain computed from data.
    pub domain: Option<ScaleDomain>,
    /// Inner padding fraction of category bands.
    pub padding: Option<f64>,
    /// Categorical domains come from group keys instead of point coordinates.
    pub is_multi_series: bool,
    /// Continuous value domains start at the data minimum instead of zero.
    pub scaled: bool,
    /// Numeric key domains are symmetric around zero.
    pub is_diverging: bool,
}

impl Default for AxisScaleConfig {
    fn default() -> Self {
        Self {
            axis_type: AxisType::Value,
            round_domains: false,
            domain: None,
            padding: None,
            is_multi_series: false,
            scaled: false,
            is_diverging: false,
        }
    }
}

impl AxisScaleConfig {
    #[must_use]
    pub fn new(axis_type: AxisType) -> Self {
        Self {
            axis_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_round_domains(mut self, round_domains: bool) -> Self {
        self.round_domains = round_domains;
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: ScaleDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_multi_series(mut self, is_multi_series: bool) -> Self {
        self.is_multi_series = is_multi_series;
        self
    }

    #[must_use]
    pub fn with_scaled(mut self, scaled: bool) -> Self {
        self.scaled = scaled;
        self
    }

    #[must_use]
    pub fn with_diverging(mut self, is_diverging: bool) -> Self {
        self.is_diverging = is_diverging;
        self
    }

    /// Band padding, defaulting to none.
    #[must_use]
    pub fn band_padding(&self) -> f64 {
        self.padding.unwrap_or(0.0)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(padding) = self.padding {
            if !padding.is_finite() || !(0.0..=1.0).contains(&padding) {
                return Err(ChartError::InvalidData(
                    "axis padding must be finite and in [0, 1]".to_owned(),
                ));
            }
        }

        match (&self.domain, self.axis_type) {
            (None, _) => Ok(()),
            (Some(ScaleDomain::Categorical(_)), AxisType::Category) => Ok(()),
            (Some(ScaleDomain::Categorical(_)), axis_type) => Err(ChartError::UnsupportedScale(
                format!("categorical domain on a {axis_type:?} axis"),
            )),
            (Some(ScaleDomain::Continuous(_)), AxisType::Category) => Err(
                ChartError::UnsupportedScale("continuous domain on a category axis".to_owned()),
            ),
            (Some(ScaleDomain::Continuous(ContinuousDomain::Time { .. })), AxisType::Time) => {
                Ok(())
            }
            (Some(ScaleDomain::Continuous(ContinuousDomain::Time { .. })), axis_type) => {
                Err(ChartError::UnsupportedScale(format!(
                    "time domain on a {axis_type:?} axis"
                )))
            }
            (Some(ScaleDomain::Continuous(ContinuousDomain::Numeric { .. })), AxisType::Time) => {
                Err(ChartError::UnsupportedScale(
                    "numeric domain on a time axis".to_owned(),
                ))
            }
            (Some(ScaleDomain::Continuous(ContinuousDomain::Numeric { min, max })), _) => {
                if min.is_finite() && max.is_finite() {
                    Ok(())
                } else {
                    Err(ChartError::InvalidData(
                        "axis domain bounds must be finite".to_owned(),
                    ))
                }
            }
        }
    }
}
