//! Configuration-driven scale factories and JSON contracts.

mod axis_config;
mod json_contract;
mod scale_factory;

pub use axis_config::{AxisScaleConfig, AxisType};
pub use json_contract::{
    AXIS_SCALE_CONFIG_JSON_SCHEMA_V1, AxisScaleConfigJsonContractV1, CHART_DATA_JSON_SCHEMA_V1,
    ChartDataJsonContractV1,
};
pub use scale_factory::{
    ChartScale, NICE_TICK_COUNT, get_radial_x_scale, get_x_scale, get_y_scale, resolve_band_size,
};
