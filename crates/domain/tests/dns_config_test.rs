use ferrous_resolve_domain::config::{
    CliOverrides, Config, ConfigError, ResolverConfig, TransportProtocol,
};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_config_default_values() {
    let config = ResolverConfig::default();

    assert_eq!(config.server, "8.8.8.8:53");
    assert_eq!(config.timeout_ms, 5000);
    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(config.protocol, TransportProtocol::Udp);
    assert!(config.tcp_fallback);
    assert!(config.recursion_desired);
}

#[test]
fn test_config_deserialization_fills_defaults() {
    let toml_str = r#"
        [resolver]
        server = "1.1.1.1"
        protocol = "tcp"
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.resolver.protocol, TransportProtocol::Tcp);
    assert_eq!(config.resolver.timeout_ms, 5000);
    assert_eq!(
        config.resolver.server_addr().unwrap(),
        "1.1.1.1:53".parse().unwrap()
    );
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_config_load_from_file_with_overrides() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [resolver]
        server = "9.9.9.9:53"
        timeout_ms = 1500

        [logging]
        level = "info"
        "#
    )
    .unwrap();

    let overrides = CliOverrides {
        server: Some("127.0.0.1:5353".to_string()),
        force_tcp: true,
        log_level: Some("debug".to_string()),
        ..Default::default()
    };
    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.resolver.server, "127.0.0.1:5353");
    assert_eq!(config.resolver.timeout_ms, 1500);
    assert_eq!(config.resolver.protocol, TransportProtocol::Tcp);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_config_missing_file() {
    let result = Config::load(Some("/nonexistent/ferrous-resolve.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_config_invalid_toml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[resolver\nserver = ").unwrap();

    let result = Config::load(file.path().to_str(), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.resolver.timeout_ms = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    config.resolver.timeout_ms = 100;
    config.resolver.server = "not-an-address".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_config_save_roundtrip() {
    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap();

    let mut config = Config::default();
    config.resolver.server = "208.67.222.222:53".to_string();
    config.resolver.tcp_fallback = false;
    config.save(path).unwrap();

    let loaded = Config::from_file(path).unwrap();
    assert_eq!(loaded.resolver.server, "208.67.222.222:53");
    assert!(!loaded.resolver.tcp_fallback);
}
