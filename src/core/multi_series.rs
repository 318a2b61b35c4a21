use crate::core::band_scale::BandScale;
use crate::core::domains::{get_deep_group_domain, get_group_domain};
use crate::core::types::{Direction, Field, InternalNestedPoint, Value};

/// Converts a fixed pixel gap into a band padding fraction.
///
/// Returns zero when the available dimension or the gap is not positive.
fn pixel_padding_ratio(count: usize, dimension: f64, padding: f64) -> f64 {
    if !(dimension > 0.0) || !(padding > 0.0) || !dimension.is_finite() {
        return 0.0;
    }
    count as f64 / (dimension / padding + 1.0)
}

/// Outer band scale over group keys for clustered layouts.
///
/// `padding` is a pixel gap kept constant between groups whatever the
/// chart size.
#[must_use]
pub fn get_group_scale(
    data: &[InternalNestedPoint],
    dimension: f64,
    direction: Direction,
    padding: f64,
) -> BandScale {
    let domain = get_group_domain(data, Field::Key);
    let spacing = pixel_padding_ratio(domain.len(), dimension, padding);
    let range = match direction {
        Direction::Vertical => (0.0, dimension),
        Direction::Horizontal => (dimension, 0.0),
    };
    BandScale::new(domain, range)
        .with_round(true)
        .with_padding_inner(spacing)
        .with_padding_outer(spacing / 2.0)
}

/// Band scale inside one group's band, over that group's own members.
#[must_use]
pub fn get_inner_scale(
    group_scale: &BandScale,
    group: &InternalNestedPoint,
    padding: f64,
) -> BandScale {
    inner_scale(group_scale, get_group_domain(&group.data, Field::Key), padding)
}

/// Band scale inside a group band over every member key seen in `data`, so
/// a series keeps the same slot in every group.
#[must_use]
pub fn get_shared_inner_scale(
    group_scale: &BandScale,
    data: &[InternalNestedPoint],
    padding: f64,
) -> BandScale {
    inner_scale(group_scale, get_deep_group_domain(data, Field::Key), padding)
}

fn inner_scale(group_scale: &BandScale, domain: Vec<Value>, padding: f64) -> BandScale {
    let size = group_scale.bandwidth();
    let spacing = pixel_padding_ratio(domain.len(), size, padding);
    BandScale::new(domain, (0.0, size))
        .with_round(true)
        .with_padding_inner(spacing)
        .with_padding_outer(spacing / 2.0)
}
