//! Radial scales.
//!
//! Radial bars and areas grow outward from an inner radius. Mapping values
//! linearly to radius would exaggerate outer values, so [`RadialScale`] maps
//! values linearly to squared radius (area) and takes the square root.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::band_scale::BandScale;
use crate::core::scale::LinearScale;
use crate::core::types::Value;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialScale {
    area: LinearScale,
    inner_radius: f64,
    outer_radius: f64,
}

impl RadialScale {
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let squared = self.area.map(value);
        if squared <= 0.0 { 0.0 } else { squared.sqrt() }
    }

    #[must_use]
    pub fn invert(self, radius: f64) -> f64 {
        self.area.invert(radius * radius)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.area.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.inner_radius, self.outer_radius)
    }

    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        self.area = self.area.nice(count);
        self
    }
}

/// Area-linear radius scale over `[inner_radius, outer_radius]`.
pub fn get_radial_y_scale(
    inner_radius: f64,
    outer_radius: f64,
    domain: (f64, f64),
) -> ChartResult<RadialScale> {
    if !inner_radius.is_finite() || !outer_radius.is_finite() || inner_radius < 0.0 {
        return Err(ChartError::InvalidData(
            "radial scale radii must be finite and >= 0".to_owned(),
        ));
    }
    let area = LinearScale::new(
        domain,
        (inner_radius * inner_radius, outer_radius * outer_radius),
    )?;
    Ok(RadialScale {
        area,
        inner_radius,
        outer_radius,
    })
}

/// Angular range covering a full turn, in radians.
#[must_use]
pub fn full_turn() -> (f64, f64) {
    (0.0, TAU)
}

/// Band scale spreading categories around a full turn.
#[must_use]
pub fn get_radial_band_scale(domain: Vec<Value>, padding: f64) -> BandScale {
    BandScale::new(domain, full_turn()).with_padding(padding)
}
