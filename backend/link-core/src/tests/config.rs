// Unit tests for link configuration loading, saving, and validation

use crate::config::LinkConfig;
use crate::error::config::ConfigError;
use crate::{DEFAULT_COMMAND_PORT, DEFAULT_EVENT_PORT, LINK_HOSTNAME};

#[test]
fn given_missing_config_file_when_loaded_then_defaults_used() {
    let dir = tempfile::tempdir().unwrap();

    let config = LinkConfig::load(dir.path()).unwrap();

    assert_eq!(config.host, LINK_HOSTNAME);
    assert_eq!(config.command_port, DEFAULT_COMMAND_PORT);
    assert_eq!(config.event_port, DEFAULT_EVENT_PORT);
}

/// **VALUE**: Verifies save-then-load round-trips every field through the
/// atomic write path.
#[test]
fn given_saved_config_when_loaded_then_values_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = LinkConfig {
        version: 1,
        host: "127.0.0.1".to_string(),
        command_port: 6061,
        event_port: 6062,
    };

    config.save(dir.path()).unwrap();
    let loaded = LinkConfig::load(dir.path()).unwrap();

    assert_eq!(loaded.command_port, 6061);
    assert_eq!(loaded.event_port, 6062);
    assert!(
        !dir.path().join("link.json.tmp").exists(),
        "Temp file renamed away"
    );
}

/// **VALUE**: Verifies fields absent from the file fall back to their
/// individual defaults instead of failing the parse.
#[test]
fn given_partial_config_file_when_loaded_then_missing_fields_defaulted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("link.json"), "{\"command_port\": 7001}").unwrap();

    let config = LinkConfig::load(dir.path()).unwrap();

    assert_eq!(config.command_port, 7001);
    assert_eq!(config.event_port, DEFAULT_EVENT_PORT);
    assert_eq!(config.host, LINK_HOSTNAME);
}

#[test]
fn given_invalid_json_when_loaded_then_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("link.json"), "{not json").unwrap();

    assert!(matches!(
        LinkConfig::load(dir.path()),
        Err(ConfigError::ParseError { .. })
    ));
}

/// **VALUE**: Verifies the two ports may never collide; both directions
/// sharing one port would have the host connect to itself.
#[test]
fn given_equal_ports_when_validated_then_rejected() {
    let config = LinkConfig {
        command_port: 5051,
        event_port: 5051,
        ..LinkConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn given_zero_port_or_empty_host_when_validated_then_rejected() {
    let zero_port = LinkConfig {
        command_port: 0,
        ..LinkConfig::default()
    };
    assert!(zero_port.validate().is_err());

    let blank_host = LinkConfig {
        host: "  ".to_string(),
        ..LinkConfig::default()
    };
    assert!(blank_host.validate().is_err());
}

#[test]
fn given_default_config_when_addresses_formatted_then_host_port_pairs() {
    let config = LinkConfig::default();

    assert_eq!(config.command_address(), "127.0.0.1:5051");
    assert_eq!(config.event_address(), "127.0.0.1:5052");
}
