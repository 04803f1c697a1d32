use std::path::Path;

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::proto::Protocol;

#[test]
fn defaults_are_valid() {
    let cfg = SimConfig::default();
    cfg.validate().expect("default config");
    assert_eq!(cfg.protocol, Protocol::AlternatingBit);
    assert_eq!(cfg.timeout_units, 20);
    assert_eq!(cfg.window, 8);
    assert_eq!(cfg.buffer_capacity, 50);
}

#[test]
fn probabilities_outside_unit_interval_are_rejected() {
    let cfg = SimConfig {
        loss_prob: 1.5,
        ..SimConfig::default()
    };
    let err = cfg.validate().expect_err("loss > 1");
    assert!(matches!(
        err,
        ConfigError::InvalidProbability { field: "loss_prob", .. }
    ));

    let cfg = SimConfig {
        corrupt_prob: -0.1,
        ..SimConfig::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidProbability { field: "corrupt_prob", .. })
    ));

    let cfg = SimConfig {
        loss_prob: f64::NAN,
        ..SimConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn degenerate_values_are_rejected() {
    let zero_messages = SimConfig {
        num_messages: 0,
        ..SimConfig::default()
    };
    assert!(matches!(zero_messages.validate(), Err(ConfigError::NoMessages)));

    let zero_delay = SimConfig {
        avg_delay: 0.0,
        ..SimConfig::default()
    };
    assert!(matches!(
        zero_delay.validate(),
        Err(ConfigError::NotPositive { field: "avg_delay", .. })
    ));

    let zero_timeout = SimConfig {
        timeout_units: 0,
        ..SimConfig::default()
    };
    assert!(matches!(
        zero_timeout.validate(),
        Err(ConfigError::NotPositive { field: "timeout_units", .. })
    ));
}

#[test]
fn window_must_fit_in_buffer() {
    let cfg = SimConfig {
        window: 60,
        buffer_capacity: 50,
        ..SimConfig::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidWindow {
            window: 60,
            buffer_capacity: 50
        })
    ));

    let cfg = SimConfig {
        window: 0,
        ..SimConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = SimConfig::from_json_str(r#"{ "protocol": "go_back_n", "loss_prob": 0.2, "seed": 42 }"#)
        .expect("parse");
    assert_eq!(cfg.protocol, Protocol::GoBackN);
    assert_eq!(cfg.loss_prob, 0.2);
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.num_messages, SimConfig::default().num_messages);
    cfg.validate().expect("valid");
}

#[test]
fn json_rejects_unknown_fields() {
    let err = SimConfig::from_json_str(r#"{ "loss": 0.2 }"#).expect_err("unknown field");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_reports_the_path() {
    let err = SimConfig::from_json_file(Path::new("/nonexistent/arq-sim.json"))
        .expect_err("no such file");
    match err {
        ConfigError::Read { path, .. } => assert_eq!(path, Path::new("/nonexistent/arq-sim.json")),
        other => panic!("unexpected error: {other}"),
    }
}
