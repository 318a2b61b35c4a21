//! reaviz: data normalization and scale math for chart rendering.
//!
//! Raw series (single or multi-series, scalar or range values, numbers,
//! dates, text or big integers) are normalized into points carrying explicit
//! `x`/`x0`/`x1`/`y`/`y0`/`y1` coordinates, then mapped to pixels by linear,
//! time, band, radial and Marimekko scales. Rendering is left to the caller.

pub mod api;
pub mod compose;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AxisScaleConfig, AxisType, ChartScale};
pub use error::{ChartError, ChartResult};
