extern crate consumer_group_mapper;

use consumer_group_mapper::config_loader::{load_config, ConfigError};
use consumer_group_mapper::connection_settings::ConnectionSettings;
use consumer_group_mapper::settings::SecurityProtocol;
use rdkafka::ClientConfig;
use std::io::Write;

#[test]
fn placeholder_is_resolved_from_environment() {
    std::env::set_var("GROUP_MAPPER_TEST_KAFKA_HOST", "broker1:9092");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "bootstrap: ${{GROUP_MAPPER_TEST_KAFKA_HOST}}").unwrap();

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.get_str("bootstrap").unwrap(), "broker1:9092");
}

#[test]
fn every_load_re_reads_the_environment() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "value: ${{GROUP_MAPPER_TEST_RELOAD}}").unwrap();

    std::env::set_var("GROUP_MAPPER_TEST_RELOAD", "first");
    let first = load_config(file.path()).unwrap();
    std::env::set_var("GROUP_MAPPER_TEST_RELOAD", "second");
    let second = load_config(file.path()).unwrap();

    assert_eq!(first.get_str("value").unwrap(), "first");
    assert_eq!(second.get_str("value").unwrap(), "second");
}

#[test]
fn cluster_config_builds_sasl_ssl_connection() {
    std::env::set_var("GROUP_MAPPER_TEST_API_SECRET", "s3cr3t");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
confluent:
  cluster:
    bootstrap_endpoint: pkc-1.example.cloud:9092
    api_key: ABCDEF
    api_secret: ${{GROUP_MAPPER_TEST_API_SECRET}}
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let settings = ConnectionSettings::from_config(&config).unwrap();
    let client_config = ClientConfig::try_from(&settings).unwrap();

    assert_eq!(settings.brokers, vec!["pkc-1.example.cloud:9092".to_owned()]);
    assert!(matches!(settings.security_protocol, SecurityProtocol::SaslSsl(_)));
    assert_eq!(client_config.get("security.protocol"), Some("sasl_ssl"));
    assert_eq!(client_config.get("sasl.username"), Some("ABCDEF"));
    assert_eq!(client_config.get("sasl.password"), Some("s3cr3t"));
}

#[test]
fn protocol_from_config_file_reaches_client_config() {
    std::env::set_var("GROUP_MAPPER_TEST_PROTOCOL", "ssl");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
confluent:
  cluster:
    bootstrap_endpoint: broker1:9093,broker2:9093
    security_protocol: ${{GROUP_MAPPER_TEST_PROTOCOL}}
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let settings = ConnectionSettings::from_config(&config).unwrap();
    let client_config = ClientConfig::try_from(&settings).unwrap();

    assert!(matches!(settings.security_protocol, SecurityProtocol::Ssl));
    assert_eq!(client_config.get("bootstrap.servers"), Some("broker1:9093,broker2:9093"));
    assert_eq!(client_config.get("security.protocol"), Some("ssl"));
    assert_eq!(client_config.get("sasl.username"), None);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "confluent: [unclosed").unwrap();

    let error = load_config(file.path()).unwrap_err();

    assert!(matches!(error, ConfigError::Parse { .. }));
}
