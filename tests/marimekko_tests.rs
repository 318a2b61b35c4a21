use approx::assert_relative_eq;
use reaviz::ChartError;
use reaviz::core::{
    Direction, NestedPoint, ShallowPoint, Value, build_marimekko_data, get_marimekko_group_scale,
    get_marimekko_scale,
};

fn two_groups() -> Vec<NestedPoint> {
    vec![
        NestedPoint::new(
            "Low",
            vec![ShallowPoint::scalar("A", 4), ShallowPoint::scalar("B", 12)],
        ),
        NestedPoint::new(
            "High",
            vec![ShallowPoint::scalar("A", 6), ShallowPoint::scalar("B", 18)],
        ),
    ]
}

#[test]
fn marimekko_data_carries_width_and_value_shares() {
    let groups = build_marimekko_data(&two_groups()).expect("build data");

    assert_eq!(groups.len(), 2);
    let a = &groups[0];
    assert_eq!(a.key, Value::from("A"));
    assert_eq!(a.data[0].x, Value::from("A"));
    assert_eq!(a.data[0].x0, Value::Number(0.0));
    assert_eq!(a.data[0].x1, Value::Number(0.25));
    assert_eq!(a.data[0].y0, Value::Number(0.0));
    assert_eq!(a.data[0].y1, Value::Number(0.4));
    assert_eq!(a.data[1].y0, Value::Number(0.4));
    assert_eq!(a.data[1].y1, Value::Number(1.0));

    let b = &groups[1];
    assert_eq!(b.data[0].x0, Value::Number(0.25));
    assert_eq!(b.data[0].x1, Value::Number(1.0));
}

#[test]
fn group_widths_are_proportional_to_totals() {
    let groups = build_marimekko_data(&two_groups()).expect("build data");
    let value_scale = get_marimekko_scale(400.0, false).expect("value scale");
    let scale = get_marimekko_group_scale(&groups, Direction::Vertical, value_scale, 0.0)
        .expect("group scale");

    let a = scale.bandwidth(&Value::from("A")).expect("band");
    let b = scale.bandwidth(&Value::from("B")).expect("band");
    assert_relative_eq!(a / b, 10.0 / 30.0, epsilon = 1e-9);
    assert_relative_eq!(a + b, 400.0, epsilon = 1e-9);
    assert_eq!(scale.map(&Value::from("A")), Some(0.0));
    assert_eq!(scale.map(&Value::from("B")), Some(100.0));
}

#[test]
fn padding_shrinks_widths_to_fit_gaps() {
    let groups = build_marimekko_data(&two_groups()).expect("build data");
    let value_scale = get_marimekko_scale(400.0, false).expect("value scale");
    let scale = get_marimekko_group_scale(&groups, Direction::Vertical, value_scale, 20.0)
        .expect("group scale");

    let a_width = scale.bandwidth(&Value::from("A")).expect("band");
    let b_start = scale.map(&Value::from("B")).expect("band");
    let b_width = scale.bandwidth(&Value::from("B")).expect("band");

    assert_relative_eq!(a_width, 95.0, epsilon = 1e-9);
    assert_relative_eq!(b_start, 115.0, epsilon = 1e-9);
    assert_relative_eq!(b_start + b_width, 400.0, epsilon = 1e-9);
    assert_relative_eq!(b_start - a_width, 20.0, epsilon = 1e-9);
}

#[test]
fn horizontal_marimekko_is_rejected() {
    let groups = build_marimekko_data(&two_groups()).expect("build data");
    let value_scale = get_marimekko_scale(400.0, false).expect("value scale");
    let err = get_marimekko_group_scale(&groups, Direction::Horizontal, value_scale, 0.0)
        .expect_err("unsupported layout");
    assert!(matches!(err, ChartError::UnsupportedLayout(_)));
}

#[test]
fn zero_totals_collapse_to_zero_width() {
    let series = vec![NestedPoint::new("Only", vec![ShallowPoint::scalar("A", 0)])];
    let groups = build_marimekko_data(&series).expect("build data");
    assert_eq!(groups[0].data[0].x1, Value::Number(0.0));

    let value_scale = get_marimekko_scale(400.0, true).expect("value scale");
    let scale = get_marimekko_group_scale(&groups, Direction::Vertical, value_scale, 0.0)
        .expect("group scale");
    assert_eq!(scale.bandwidth(&Value::from("A")), Some(0.0));
}
