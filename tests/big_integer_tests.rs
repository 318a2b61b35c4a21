use chrono::{TimeZone, Utc};
use reaviz::core::{
    Direction, Key, MAX_SAFE_INTEGER, NestedPoint, ShallowPoint, Value, big_integer_divisor,
    build_nested_chart_data, build_shallow_chart_data, get_max_big_integer_for_nested,
    get_max_big_integer_for_shallow, normalize_value, normalize_value_for_formatting,
};
use rust_decimal::Decimal;

const BIG: i128 = 90_071_992_547_409_910; // 10 * (2^53 - 1)

fn dec(value: i128) -> Decimal {
    Decimal::from_i128_with_scale(value, 0)
}

#[test]
fn safe_magnitudes_need_no_divisor() {
    assert_eq!(big_integer_divisor(Decimal::from(MAX_SAFE_INTEGER)), Decimal::ONE);
    assert_eq!(big_integer_divisor(Decimal::from(-42)), Decimal::ONE);
}

#[test]
fn divisor_is_smallest_power_of_ten_under_safe_limit() {
    assert_eq!(big_integer_divisor(dec(BIG)), Decimal::TEN);
    assert_eq!(
        big_integer_divisor(dec(BIG * 1_000)),
        Decimal::from(10_000)
    );
}

#[test]
fn max_big_integer_ignores_plain_values() {
    let series = vec![ShallowPoint::scalar("a", 10), ShallowPoint::scalar(3.5, 2)];
    assert_eq!(get_max_big_integer_for_shallow(&series), None);
}

#[test]
fn max_big_integer_scans_keys_and_values() {
    let big = Key::big_int(BIG).expect("big int");
    let negative = Key::big_int(-BIG * 2).expect("big int");
    let series = vec![
        ShallowPoint::scalar(big.clone(), 1),
        ShallowPoint::scalar("b", negative),
    ];
    assert_eq!(
        get_max_big_integer_for_shallow(&series),
        Some(dec(BIG * 2))
    );

    let nested = vec![
        NestedPoint::new("S1", vec![ShallowPoint::scalar("a", 1)]),
        NestedPoint::new("S2", vec![ShallowPoint::scalar("a", big)]),
    ];
    assert_eq!(get_max_big_integer_for_nested(&nested), Some(dec(BIG)));
}

#[test]
fn big_integer_series_key_does_not_rescale_values() {
    let series_key = Key::big_int(100_000_000_000_000_000_000).expect("big key");
    let nested = vec![
        NestedPoint::new(
            series_key,
            vec![ShallowPoint::scalar("a", Key::big_int(500).expect("big value"))],
        ),
        NestedPoint::new("plain", vec![ShallowPoint::scalar("a", 100)]),
    ];
    assert_eq!(get_max_big_integer_for_nested(&nested), Some(dec(500)));

    let groups = build_nested_chart_data(&nested, false, Direction::Vertical).expect("build data");
    let ys: Vec<&Value> = groups[0].data.iter().map(|point| &point.y).collect();
    assert_eq!(ys, vec![&Value::Number(500.0), &Value::Number(100.0)]);
    assert_eq!(
        groups[0].data[0].key,
        Value::from("100000000000000000000")
    );
}

#[test]
fn normalize_value_passes_plain_values_through() {
    let date = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).single().expect("valid ts");
    assert_eq!(
        normalize_value(&Key::from(4.5), None).expect("normalize"),
        Value::Number(4.5)
    );
    assert_eq!(
        normalize_value(&Key::from("x"), None).expect("normalize"),
        Value::from("x")
    );
    assert_eq!(
        normalize_value(&Key::from(date), None).expect("normalize"),
        Value::Date(date)
    );
}

#[test]
fn normalize_value_scales_big_integers_by_series_max() {
    let key = Key::big_int(BIG).expect("big int");
    let value = normalize_value(&key, Some(dec(BIG))).expect("normalize");
    assert_eq!(value, Value::Number(9_007_199_254_740_991.0));

    let small = Key::big_int(BIG / 10).expect("big int");
    let scaled = normalize_value(&small, Some(dec(BIG))).expect("normalize");
    let Value::Number(n) = scaled else {
        panic!("expected number");
    };
    assert!((n - 900_719_925_474_099.1).abs() <= 1.0);
}

#[test]
fn formatting_keeps_big_integer_digits() {
    let key = Key::big_int(BIG).expect("big int");
    assert_eq!(
        normalize_value_for_formatting(&key),
        Value::from("90071992547409910")
    );
    assert_eq!(normalize_value_for_formatting(&Key::from(3)), Value::Number(3.0));
}

#[test]
fn builders_share_one_divisor_per_dataset() {
    let series = vec![
        ShallowPoint::scalar("a", Key::big_int(BIG).expect("big int")),
        ShallowPoint::scalar("b", Key::big_int(BIG / 2).expect("big int")),
    ];
    let result = build_shallow_chart_data(&series, Direction::Vertical, None).expect("build data");

    let a = result[0].y1.as_f64().expect("numeric");
    let b = result[1].y1.as_f64().expect("numeric");
    assert!(a <= MAX_SAFE_INTEGER as f64);
    assert!((a / b - 2.0).abs() <= 1e-9);
    assert_eq!(result[0].value, Value::from("90071992547409910"));
}

#[test]
fn nested_builder_normalizes_big_integers() {
    let series = vec![NestedPoint::new(
        "S1",
        vec![ShallowPoint::scalar("a", Key::big_int(BIG).expect("big int"))],
    )];
    let result = build_nested_chart_data(&series, false, Direction::Vertical).expect("build data");
    assert_eq!(
        result[0].data[0].y1,
        Value::Number(9_007_199_254_740_991.0)
    );
}

#[test]
fn oversized_big_int_is_rejected() {
    assert!(Key::big_int(i128::MAX).is_err());
}
