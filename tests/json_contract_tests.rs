use reaviz::api::{AxisScaleConfig, AxisType, CHART_DATA_JSON_SCHEMA_V1};
use reaviz::core::{
    ChartData, ContinuousDomain, Direction, InternalData, Key, NestedPoint, ScaleDomain,
    ShallowPoint, build_shallow_chart_data,
};

fn dataset() -> ChartData {
    ChartData::Nested(vec![NestedPoint::new(
        "S1",
        vec![
            ShallowPoint::scalar("2020", 5),
            ShallowPoint::range("2021", 1, Key::big_int(90_071_992_547_409_910).expect("big int")),
        ],
    )])
}

#[test]
fn chart_data_contract_round_trips() {
    let data = dataset();
    let json = data.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = ChartData::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, data);
}

#[test]
fn bare_chart_data_json_is_accepted() {
    let data = dataset();
    let json = serde_json::to_string(&data).expect("serialize");
    assert_eq!(ChartData::from_json_compat_str(&json).expect("parse"), data);
}

#[test]
fn unknown_chart_data_schema_is_rejected() {
    let json = serde_json::json!({
        "schema_version": CHART_DATA_JSON_SCHEMA_V1 + 1,
        "data": serde_json::to_value(dataset()).expect("to value"),
    })
    .to_string();
    assert!(ChartData::from_json_compat_str(&json).is_err());
}

#[test]
fn axis_config_contract_round_trips() {
    let config = AxisScaleConfig::new(AxisType::Value)
        .with_round_domains(true)
        .with_domain(ScaleDomain::Continuous(ContinuousDomain::numeric(0.0, 10.0)));
    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert_eq!(AxisScaleConfig::from_json_compat_str(&json).expect("parse"), config);
}

#[test]
fn partial_axis_config_uses_defaults() {
    let config = AxisScaleConfig::from_json_compat_str(r#"{ "axis_type": "category", "padding": 0.1 }"#)
        .expect("parse");
    assert_eq!(config.axis_type, AxisType::Category);
    assert_eq!(config.padding, Some(0.1));
    assert!(!config.round_domains);
}

#[test]
fn invalid_axis_config_json_is_rejected() {
    assert!(AxisScaleConfig::from_json_compat_str(r#"{ "padding": 3.0 }"#).is_err());
    assert!(AxisScaleConfig::from_json_compat_str("not json").is_err());
}

#[test]
fn internal_data_dumps_to_json() {
    let series = vec![ShallowPoint::scalar("a", 1)];
    let data = InternalData::Shallow(
        build_shallow_chart_data(&series, Direction::Vertical, None).expect("build data"),
    );
    let json = data.to_json_pretty().expect("serialize");
    assert!(json.contains("\"shape\": \"shallow\""));
}
