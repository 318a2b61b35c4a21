use proptest::prelude::*;
use reaviz::core::{
    Direction, Field, Key, NestedPoint, ShallowPoint, Value, build_nested_chart_data,
    build_shallow_chart_data, build_waterfall, get_group_domain, get_y_domain,
    normalize_value_for_formatting,
};

fn raw_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        (-1.0e6f64..1.0e6).prop_map(Key::from),
        "[a-z]{1,6}".prop_map(Key::from),
        (-(1i128 << 80)..(1i128 << 80)).prop_map(|n| Key::big_int(n).expect("in range")),
    ]
}

proptest! {
    #[test]
    fn vertical_non_negative_points_keep_zero_x0(
        values in prop::collection::vec(0.0f64..1.0e9, 0..40)
    ) {
        let series: Vec<ShallowPoint> = values
            .iter()
            .enumerate()
            .map(|(i, v)| ShallowPoint::scalar(format!("k{i}"), *v))
            .collect();
        let result = build_shallow_chart_data(&series, Direction::Vertical, None).expect("build data");

        prop_assert_eq!(result.len(), series.len());
        for point in &result {
            prop_assert_eq!(&point.x0, &Value::Number(0.0));
        }
    }

    #[test]
    fn display_fields_preserve_raw_keys(
        pairs in prop::collection::vec((raw_key(), raw_key()), 0..30)
    ) {
        let series: Vec<ShallowPoint> = pairs
            .iter()
            .map(|(key, value)| ShallowPoint::scalar(key.clone(), value.clone()))
            .collect();
        let result = build_shallow_chart_data(&series, Direction::Vertical, None).expect("build data");

        for (point, (key, value)) in result.iter().zip(&pairs) {
            prop_assert_eq!(&point.key, &normalize_value_for_formatting(key));
            prop_assert_eq!(&point.value, &normalize_value_for_formatting(value));
        }
    }

    #[test]
    fn waterfall_segments_chain(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..40)) {
        let series: Vec<ShallowPoint> = values
            .iter()
            .enumerate()
            .map(|(i, v)| ShallowPoint::scalar(format!("k{i}"), *v))
            .collect();
        let result = build_waterfall(&series, Direction::Vertical, None).expect("waterfall");

        prop_assert_eq!(&result[0].y0, &Value::Number(0.0));
        for pair in result.windows(2) {
            prop_assert_eq!(&pair[0].y1, &pair[1].y0);
        }
    }

    #[test]
    fn y_domain_covers_every_value(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..40)) {
        let series: Vec<ShallowPoint> = values
            .iter()
            .enumerate()
            .map(|(i, v)| ShallowPoint::scalar(format!("k{i}"), *v))
            .collect();
        let result = build_shallow_chart_data(&series, Direction::Vertical, None).expect("build data");
        let (min, max) = get_y_domain(result.as_slice(), false).bounds();

        for v in &values {
            prop_assert!(*v >= min && *v <= max);
        }
        if values.iter().any(|v| *v < 0.0) {
            prop_assert_eq!(min, -max);
        }
    }

    #[test]
    fn group_domain_is_distinct_in_first_seen_order(keys in prop::collection::vec("[a-d]", 0..30)) {
        let series: Vec<ShallowPoint> = keys.iter().map(|k| ShallowPoint::scalar(k.as_str(), 1)).collect();
        let result = build_shallow_chart_data(&series, Direction::Vertical, None).expect("build data");
        let domain = get_group_domain(&result, Field::Key);

        let mut expected: Vec<Value> = Vec::new();
        for key in &keys {
            let value = Value::from(key.as_str());
            if !expected.contains(&value) {
                expected.push(value);
            }
        }
        prop_assert_eq!(domain, expected);
    }

    #[test]
    fn nested_regrouping_keeps_every_point(
        matrix in prop::collection::vec(prop::collection::vec(0.0f64..100.0, 1..6), 1..6)
    ) {
        let series: Vec<NestedPoint> = matrix
            .iter()
            .enumerate()
            .map(|(s, row)| {
                NestedPoint::new(
                    format!("S{s}"),
                    row.iter()
                        .enumerate()
                        .map(|(k, v)| ShallowPoint::scalar(format!("K{k}"), *v))
                        .collect(),
                )
            })
            .collect();
        let groups = build_nested_chart_data(&series, false, Direction::Vertical).expect("build data");

        let total: usize = groups.iter().map(|group| group.data.len()).sum();
        let expected: usize = matrix.iter().map(Vec::len).sum();
        prop_assert_eq!(total, expected);
        for group in &groups {
            for point in &group.data {
                prop_assert_eq!(&point.x, &group.key);
            }
        }
    }
}
