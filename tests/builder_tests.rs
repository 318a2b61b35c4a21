use chrono::{TimeZone, Utc};
use reaviz::core::{
    BinSize, Direction, NestedPoint, ShallowPoint, TimeInterval, Value, build_nested_chart_data,
    build_shallow_chart_data,
};

fn categories() -> Vec<ShallowPoint> {
    vec![
        ShallowPoint::scalar("Lateral Movement", 25),
        ShallowPoint::scalar("Discovery", 5),
        ShallowPoint::scalar("Persistence", 18),
    ]
}

#[test]
fn vertical_category_points_start_at_zero_baseline() {
    let result =
        build_shallow_chart_data(&categories(), Direction::Vertical, None).expect("build data");

    assert_eq!(result.len(), 3);
    for point in &result {
        assert_eq!(point.x0, Value::Number(0.0));
        assert_eq!(point.x1, point.x);
        assert_eq!(point.y0, Value::Number(0.0));
        assert_eq!(point.y, point.y1);
    }
    assert_eq!(result[0].x, Value::from("Lateral Movement"));
    assert_eq!(result[0].y1, Value::Number(25.0));
    assert_eq!(result[2].key, Value::from("Persistence"));
    assert_eq!(result[2].value, Value::Number(18.0));
}

#[test]
fn horizontal_layout_swaps_axes() {
    let result =
        build_shallow_chart_data(&categories(), Direction::Horizontal, None).expect("build data");

    let first = &result[0];
    assert_eq!(first.y, Value::from("Lateral Movement"));
    assert_eq!(first.y0, Value::Number(0.0));
    assert_eq!(first.x0, Value::Number(0.0));
    assert_eq!(first.x1, Value::Number(25.0));
    assert_eq!(first.x, Value::Number(25.0));
}

#[test]
fn range_points_span_start_to_end() {
    let series = vec![
        ShallowPoint::range("Mon", 4, 10),
        ShallowPoint::range("Tue", -2, 6),
    ];
    let result = build_shallow_chart_data(&series, Direction::Vertical, None).expect("build data");

    assert_eq!(result[0].y0, Value::Number(4.0));
    assert_eq!(result[0].y1, Value::Number(10.0));
    assert_eq!(result[0].value, Value::Number(10.0));
    assert_eq!(result[1].y0, Value::Number(-2.0));
    assert_eq!(result[1].y1, Value::Number(6.0));
}

#[test]
fn numeric_bin_size_spans_key_to_key_plus_size() {
    let series = vec![ShallowPoint::scalar(10.0, 3), ShallowPoint::scalar(20.0, 4)];
    let result = build_shallow_chart_data(&series, Direction::Vertical, Some(BinSize::Numeric(5.0)))
        .expect("build data");

    assert_eq!(result[0].x0, Value::Number(10.0));
    assert_eq!(result[0].x1, Value::Number(15.0));
    assert_eq!(result[1].x0, Value::Number(20.0));
    assert_eq!(result[1].x1, Value::Number(25.0));
}

#[test]
fn interval_bin_size_uses_calendar_offsets() {
    let jan = Utc.with_ymd_and_hms(2020, 1, 31, 0, 0, 0).single().expect("valid ts");
    let series = vec![ShallowPoint::scalar(jan, 7)];
    let result = build_shallow_chart_data(
        &series,
        Direction::Vertical,
        Some(BinSize::Interval(TimeInterval::Day(1))),
    )
    .expect("build data");

    let next = Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).single().expect("valid ts");
    assert_eq!(result[0].x0, Value::Date(jan));
    assert_eq!(result[0].x1, Value::Date(next));
}

#[test]
fn bin_size_on_text_key_is_rejected() {
    let series = vec![ShallowPoint::scalar("a", 1)];
    let result = build_shallow_chart_data(&series, Direction::Vertical, Some(BinSize::Numeric(1.0)));
    assert!(result.is_err());
}

#[test]
fn meta_and_id_are_carried_through() {
    let series = vec![
        ShallowPoint::scalar("a", 1)
            .with_id("first")
            .with_meta(serde_json::json!({ "severity": "high" })),
    ];
    let result = build_shallow_chart_data(&series, Direction::Vertical, None).expect("build data");

    assert_eq!(result[0].id.as_deref(), Some("first"));
    assert_eq!(result[0].meta, Some(serde_json::json!({ "severity": "high" })));
}

#[test]
fn empty_series_builds_empty_result() {
    let shallow = build_shallow_chart_data(&[], Direction::Vertical, None).expect("build data");
    let nested = build_nested_chart_data(&[], true, Direction::Vertical).expect("build data");
    assert!(shallow.is_empty());
    assert!(nested.is_empty());
}

#[test]
fn nested_regroups_series_by_inner_key() {
    let series = vec![
        NestedPoint::new("S1", vec![ShallowPoint::scalar("2020", 5)]),
        NestedPoint::new("S2", vec![ShallowPoint::scalar("2020", 7)]),
    ];
    let result = build_nested_chart_data(&series, false, Direction::Vertical).expect("build data");

    assert_eq!(result.len(), 1);
    let group = &result[0];
    assert_eq!(group.key, Value::from("2020"));
    assert_eq!(group.data.len(), 2);
    assert_eq!(group.data[0].key, Value::from("S1"));
    assert_eq!(group.data[0].value, Value::Number(5.0));
    assert_eq!(group.data[0].x, Value::from("2020"));
    assert_eq!(group.data[1].key, Value::from("S2"));
    assert_eq!(group.data[1].value, Value::Number(7.0));
}

#[test]
fn nested_groups_keep_first_seen_order_and_tolerate_ragged_series() {
    let series = vec![
        NestedPoint::new(
            "Threat",
            vec![ShallowPoint::scalar("b", 1), ShallowPoint::scalar("a", 2)],
        ),
        NestedPoint::new(
            "Vulnerability",
            vec![
                ShallowPoint::scalar("a", 3),
                ShallowPoint::scalar("c", 4),
                ShallowPoint::scalar("b", 5),
            ],
        ),
    ];
    let result = build_nested_chart_data(&series, false, Direction::Vertical).expect("build data");

    let keys: Vec<&Value> = result.iter().map(|group| &group.key).collect();
    assert_eq!(keys, [&Value::from("b"), &Value::from("a"), &Value::from("c")]);
    let sizes: Vec<usize> = result.iter().map(|group| group.data.len()).collect();
    assert_eq!(sizes, [2, 2, 1]);
}

#[test]
fn nested_sort_orders_groups_by_descending_median() {
    let series = vec![
        NestedPoint::new(
            "S1",
            vec![
                ShallowPoint::scalar("low", 1),
                ShallowPoint::scalar("high", 50),
                ShallowPoint::scalar("mid", 10),
            ],
        ),
        NestedPoint::new(
            "S2",
            vec![
                ShallowPoint::scalar("low", 3),
                ShallowPoint::scalar("high", 70),
                ShallowPoint::scalar("mid", 20),
            ],
        ),
    ];
    let result = build_nested_chart_data(&series, true, Direction::Vertical).expect("build data");

    let keys: Vec<&Value> = result.iter().map(|group| &group.key).collect();
    assert_eq!(
        keys,
        [&Value::from("high"), &Value::from("mid"), &Value::from("low")]
    );
}

#[test]
fn nested_sort_keeps_first_seen_order_on_ties() {
    let series = vec![NestedPoint::new(
        "S1",
        vec![ShallowPoint::scalar("x", 4), ShallowPoint::scalar("y", 4)],
    )];
    let result = build_nested_chart_data(&series, true, Direction::Vertical).expect("build data");
    assert_eq!(result[0].key, Value::from("x"));
    assert_eq!(result[1].key, Value::from("y"));
}

#[test]
fn builders_do_not_mutate_input() {
    let series = categories();
    let before = series.clone();
    let _ = build_shallow_chart_data(&series, Direction::Horizontal, None).expect("build data");
    assert_eq!(series, before);
}

#[test]
fn nested_points_inherit_series_meta_and_id() {
    let series = vec![
        NestedPoint::new(
            "Threat",
            vec![
                ShallowPoint::scalar("Mon", 3),
                ShallowPoint::scalar("Tue", 8).with_id("tue-threat"),
            ],
        )
        .with_meta(serde_json::json!({ "color": "red" }))
        .with_id("threat"),
        NestedPoint::new("Vulnerability", vec![ShallowPoint::scalar("Mon", 5)]),
    ];

    let groups = build_nested_chart_data(&series, false, Direction::Vertical).expect("build data");

    let mon = &groups[0];
    assert_eq!(mon.meta, None);
    assert_eq!(mon.id, None);
    assert_eq!(mon.data[0].meta, Some(serde_json::json!({ "color": "red" })));
    assert_eq!(mon.data[0].id.as_deref(), Some("threat"));
    assert_eq!(mon.data[1].meta, None);
    assert_eq!(mon.data[1].id, None);

    let tue = &groups[1];
    assert_eq!(tue.data[0].id.as_deref(), Some("tue-threat"));
    assert_eq!(tue.data[0].meta, Some(serde_json::json!({ "color": "red" })));
}
