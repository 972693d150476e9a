use super::*;

#[test]
fn json_defaults_fill_missing_fields() {
    let cfg = AttractorConfig::from_json_str(r#"{ "x": "sin(a*y)", "y": "cos(b*x)" }"#).unwrap();
    assert_eq!(cfg.constants, vec!["a", "b", "c", "d"]);
    assert_eq!(cfg.precision_points, DEFAULT_PRECISION_POINTS);
    assert_eq!(cfg.alpha_k, DEFAULT_ALPHA_K);
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.channel_source(Channel::Z), None);
}

#[test]
fn json_round_trips_through_serde() {
    let cfg = AttractorConfig::clifford()
        .with_seed(11)
        .with_channel(Channel::Red, "abs(x)");
    let json = cfg.to_json_string().unwrap();
    assert_eq!(AttractorConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn unknown_fields_and_bad_json_are_serde_errors() {
    let err = AttractorConfig::from_json_str(r#"{ "x": "x", "y": "y", "w": "1" }"#).unwrap_err();
    assert!(matches!(err, AttractorError::Serde(_)));
    let err = AttractorConfig::from_json_str(r#"{ "x": "x" }"#).unwrap_err();
    assert!(matches!(err, AttractorError::Serde(_)));
}

#[test]
fn invalid_settings_are_config_errors() {
    let err = AttractorConfig::classic()
        .with_precision_points(0)
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("precision_points"));

    let mut cfg = AttractorConfig::classic();
    cfg.alpha_k = f64::NAN;
    assert!(matches!(cfg.validate(), Err(AttractorError::Config(_))));
    cfg.alpha_k = -1.0;
    assert!(matches!(cfg.validate(), Err(AttractorError::Config(_))));
}

#[test]
fn constants_may_not_shadow_variables() {
    let mut cfg = AttractorConfig::clifford();
    cfg.constants.push("red".to_owned());
    assert!(cfg.validate().unwrap_err().to_string().contains("red"));

    let mut cfg = AttractorConfig::clifford();
    cfg.constants.push("a".to_owned());
    assert!(cfg.validate().unwrap_err().to_string().contains("twice"));
}

#[test]
fn presets_resolve_by_name() {
    for name in AttractorConfig::PRESETS {
        assert!(AttractorConfig::preset(name).is_some(), "{name}");
    }
    assert!(AttractorConfig::preset("nope").is_none());
    assert!(AttractorConfig::classic().constants.is_empty());
}

#[test]
fn channels_are_indexed_in_binding_order() {
    for (i, ch) in Channel::ALL.into_iter().enumerate() {
        assert_eq!(ch.index(), i);
    }
    assert_eq!(variable_names(), ["x", "y", "z", "red", "green", "blue"]);
    assert!(Channel::X.is_required() && !Channel::Blue.is_required());
    assert_eq!(Channel::Green.default_value(), 1.0);
}

#[test]
fn random_clifford_writes_coefficients_as_literals() {
    use rand::SeedableRng;

    let cfg = AttractorConfig::random_clifford(&mut rand::rngs::StdRng::seed_from_u64(5));
    assert!(cfg.constants.is_empty());
    assert!(cfg.x.starts_with("sin("));
    assert!(cfg.z.is_some());
    cfg.validate().unwrap();

    let again = AttractorConfig::random_clifford(&mut rand::rngs::StdRng::seed_from_u64(5));
    assert_eq!(cfg, again);

    let coefficients: Vec<f64> = [cfg.x.as_str(), cfg.y.as_str()]
        .iter()
        .flat_map(|src| src.split(|c: char| c == '(' || c == ' '))
        .filter_map(|word| word.parse::<f64>().ok())
        .collect();
    assert_eq!(coefficients.len(), 6);
    assert!(coefficients.iter().all(|v| CLIFFORD_COEFFICIENT_RANGE.contains(v)));
}
