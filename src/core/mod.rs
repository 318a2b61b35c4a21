pub mod band_scale;
pub mod big_integer;
pub mod bins;
pub mod builder;
pub mod domains;
pub mod marimekko;
pub mod multi_series;
pub mod primitives;
pub mod radial;
pub mod scale;
pub mod stack;
pub mod time_interval;
pub mod time_scale;
pub mod types;

pub use band_scale::BandScale;
pub use big_integer::{
    MAX_SAFE_INTEGER, big_integer_divisor, get_max_big_integer_for_nested,
    get_max_big_integer_for_shallow, normalize_value, normalize_value_for_formatting,
};
pub use bins::{BinAggregate, Thresholds, bin_domain, build_bins};
pub use builder::{BinSize, build_nested_chart_data, build_shallow_chart_data, build_waterfall};
pub use domains::{
    Accessor, ContinuousDomain, ScaleDomain, extent, get_deep_group_domain, get_group_domain,
    get_x_domain, get_y_domain, unique_by,
};
pub use marimekko::{
    MarimekkoScale, build_marimekko_data, get_marimekko_group_scale, get_marimekko_scale,
};
pub use multi_series::{get_group_scale, get_inner_scale, get_shared_inner_scale};
pub use radial::{RadialScale, full_turn, get_radial_band_scale, get_radial_y_scale};
pub use scale::LinearScale;
pub use stack::{StackOffset, build_stack_data};
pub use time_interval::TimeInterval;
pub use time_scale::TimeScale;
pub use types::{
    ChartData, Direction, Field, FieldAccess, InternalData, InternalNestedPoint,
    InternalShallowPoint, Key, NestedPoint, PointCollection, PointData, ShallowPoint, Value,
};
