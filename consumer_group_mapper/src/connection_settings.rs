use crate::config_loader::{
    ConfigError, ConfigTree, API_KEY_PATH, API_SECRET_PATH, BOOTSTRAP_ENDPOINT_PATH,
    SECURITY_PROTOCOL_PATH,
};
use crate::settings::{PlainCredentials, SaslMechanism, SecurityProtocol};
use anyhow::bail;
use rdkafka::ClientConfig;

pub const DEFAULT_SECURITY_PROTOCOL: &str = "sasl_ssl";

#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub brokers: Vec<String>,
    pub security_protocol: SecurityProtocol,
}

impl ConnectionSettings {
    /// Reads the `confluent/cluster` section. Without `security_protocol` the
    /// cluster is reached with SASL/PLAIN over TLS, the api key being the
    /// username and the api secret the password. SASL protocols require both.
    pub fn from_config(config: &ConfigTree) -> Result<Self, ConfigError> {
        let protocol = config
            .find_str(SECURITY_PROTOCOL_PATH)?
            .unwrap_or(DEFAULT_SECURITY_PROTOCOL)
            .to_ascii_lowercase();

        let brokers = config
            .get_str(BOOTSTRAP_ENDPOINT_PATH)?
            .split(',')
            .map(|x| x.trim())
            .filter(|x| !x.is_empty())
            .map(|x| x.to_owned())
            .collect();

        let security_protocol = match protocol.as_str() {
            "plaintext" => SecurityProtocol::Plaintext,
            "ssl" => SecurityProtocol::Ssl,
            "sasl_plaintext" => SecurityProtocol::SaslPlaintext(plain_mechanism(config)?),
            "sasl_ssl" => SecurityProtocol::SaslSsl(plain_mechanism(config)?),
            _ => {
                return Err(ConfigError::InvalidValue {
                    path: SECURITY_PROTOCOL_PATH.to_owned(),
                    value: protocol,
                })
            }
        };

        Ok(Self {
            brokers,
            security_protocol,
        })
    }
}

fn plain_mechanism(config: &ConfigTree) -> Result<SaslMechanism, ConfigError> {
    Ok(SaslMechanism::Plain(PlainCredentials {
        username: config.get_str(API_KEY_PATH)?.to_owned(),
        password: config.get_str(API_SECRET_PATH)?.to_owned(),
    }))
}

impl TryFrom<&ConnectionSettings> for ClientConfig {
    type Error = anyhow::Error;

    fn try_from(value: &ConnectionSettings) -> Result<Self, Self::Error> {
        if value.brokers.is_empty() {
            bail!("No brokers specified")
        }

        let mut config = ClientConfig::new();

        let brokers_string = value.brokers.join(",");
        config
            .set("bootstrap.servers", brokers_string)
            .set("security.protocol", value.security_protocol.to_string());

        if let Some(mechanism) = value.security_protocol.sasl_mechanism() {
            config.set("sasl.mechanisms", mechanism.to_string());
            match mechanism {
                SaslMechanism::Plain(credentials) => {
                    config
                        .set("sasl.username", &credentials.username)
                        .set("sasl.password", &credentials.password);
                }
            }
        }

        if let Ok(value) = std::env::var("RD_KAFKA_DEBUG") {
            config.set("debug", value);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::parse_config;

    fn config(content: &str) -> ConfigTree {
        parse_config(content, |_| None).unwrap()
    }

    #[test]
    fn default_protocol_is_sasl_ssl_plain() {
        let tree = config(
            r#"
confluent:
  cluster:
    bootstrap_endpoint: "broker1:9092, broker2:9092"
    api_key: key
    api_secret: secret
"#,
        );

        let settings = ConnectionSettings::from_config(&tree).unwrap();
        let client_config = ClientConfig::try_from(&settings).unwrap();

        assert_eq!(
            client_config.get("bootstrap.servers"),
            Some("broker1:9092,broker2:9092")
        );
        assert_eq!(client_config.get("security.protocol"), Some("sasl_ssl"));
        assert_eq!(client_config.get("sasl.mechanisms"), Some("PLAIN"));
        assert_eq!(client_config.get("sasl.username"), Some("key"));
        assert_eq!(client_config.get("sasl.password"), Some("secret"));
    }

    #[test]
    fn plaintext_needs_no_credentials() {
        let tree = config(
            r#"
confluent:
  cluster:
    bootstrap_endpoint: localhost:9092
    security_protocol: PLAINTEXT
"#,
        );

        let settings = ConnectionSettings::from_config(&tree).unwrap();
        let client_config = ClientConfig::try_from(&settings).unwrap();

        assert_eq!(client_config.get("security.protocol"), Some("plaintext"));
        assert_eq!(client_config.get("sasl.mechanisms"), None);
    }

    #[test]
    fn sasl_plaintext_requires_api_secret() {
        let tree = config(
            r#"
confluent:
  cluster:
    bootstrap_endpoint: localhost:9092
    security_protocol: sasl_plaintext
    api_key: key
"#,
        );

        let error = ConnectionSettings::from_config(&tree).unwrap_err();

        assert!(matches!(error, ConfigError::MissingKey(path) if path == API_SECRET_PATH));
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        let tree = config(
            r#"
confluent:
  cluster:
    bootstrap_endpoint: localhost:9092
    security_protocol: carrier_pigeon
"#,
        );

        let error = ConnectionSettings::from_config(&tree).unwrap_err();

        assert!(matches!(error, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn missing_bootstrap_endpoint_fails_on_access() {
        let tree = config("confluent:\n  cluster: {}\n");

        let error = ConnectionSettings::from_config(&tree).unwrap_err();

        assert!(matches!(error, ConfigError::MissingKey(path) if path == BOOTSTRAP_ENDPOINT_PATH));
    }

    #[test]
    fn empty_brokers_are_rejected() {
        let settings = ConnectionSettings {
            brokers: vec![],
            security_protocol: SecurityProtocol::Ssl,
        };

        assert!(ClientConfig::try_from(&settings).is_err());
    }
}
