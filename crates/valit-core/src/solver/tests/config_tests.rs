use crate::{DEFAULT_HORIZON, SolverConfig, SolverConfigError, Stopping};

#[test]
fn default_config_yaml_parses() {
    let config = SolverConfig::from_default_yaml().expect("default yaml should parse");
    assert_eq!(config.horizon, DEFAULT_HORIZON);
    assert_eq!(config.discount, 1.0);
    assert_eq!(config.stopping, Stopping::FixedHorizon);
}

#[test]
fn omitted_fields_fall_back_to_defaults() {
    let config = SolverConfig::from_yaml_str("discount: 0.9\n").expect("partial yaml should parse");
    assert_eq!(config.discount, 0.9);
    assert_eq!(config.horizon, DEFAULT_HORIZON);
    assert_eq!(config.stopping, Stopping::FixedHorizon);
}

#[test]
fn tolerance_stopping_parses() {
    let yaml = "discount: 0.8\nhorizon: 500\nstopping:\n  mode: tolerance\n  tolerance: 0.000001\n";
    let config = SolverConfig::from_yaml_str(yaml).expect("tolerance yaml should parse");
    assert_eq!(config.stopping, Stopping::Tolerance { tolerance: 0.000001 });
}

#[test]
fn invalid_values_are_rejected() {
    let err = SolverConfig::from_yaml_str("horizon: 0\n").expect_err("zero horizon");
    assert!(matches!(err, SolverConfigError::ZeroHorizon));

    for yaml in ["discount: 1.5\n", "discount: -0.1\n", "discount: .nan\n"] {
        let err = SolverConfig::from_yaml_str(yaml).expect_err("discount should be rejected");
        assert!(matches!(err, SolverConfigError::Discount(_)), "{yaml}");
    }

    let err = SolverConfig::from_yaml_str("stopping:\n  mode: tolerance\n  tolerance: 0.0\n")
        .expect_err("zero tolerance");
    assert!(matches!(err, SolverConfigError::Tolerance(t) if t == 0.0));
}

#[test]
fn missing_config_file_names_the_path() {
    let path = std::env::temp_dir().join("valit-no-such-solver-config.yaml");
    let err = SolverConfig::from_yaml_path(&path).expect_err("file does not exist");

    assert!(matches!(&err, SolverConfigError::Io { path: p, .. } if *p == path));
    assert!(err.to_string().contains("valit-no-such-solver-config.yaml"));
}

#[test]
fn unknown_stopping_mode_is_a_yaml_error() {
    let err = SolverConfig::from_yaml_str("stopping:\n  mode: forever\n")
        .expect_err("unknown mode should fail");
    assert!(matches!(err, SolverConfigError::Yaml(_)));
}
