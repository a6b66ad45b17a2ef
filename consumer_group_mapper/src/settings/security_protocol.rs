use std::fmt::{Debug, Display, Formatter};

#[derive(Debug, Clone)]
pub enum SecurityProtocol {
    Plaintext,
    Ssl,
    SaslPlaintext(SaslMechanism),
    SaslSsl(SaslMechanism),
}

#[derive(Debug, Clone)]
pub enum SaslMechanism {
    Plain(PlainCredentials),
}

#[derive(Clone)]
pub struct PlainCredentials {
    pub username: String,
    pub password: String,
}

impl SecurityProtocol {
    pub fn sasl_mechanism(&self) -> Option<&SaslMechanism> {
        match self {
            SecurityProtocol::Plaintext | SecurityProtocol::Ssl => None,
            SecurityProtocol::SaslPlaintext(mechanism) | SecurityProtocol::SaslSsl(mechanism) => {
                Some(mechanism)
            }
        }
    }
}

impl Display for SecurityProtocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityProtocol::Plaintext => write!(f, "plaintext"),
            SecurityProtocol::Ssl => write!(f, "ssl"),
            SecurityProtocol::SaslPlaintext(_) => write!(f, "sasl_plaintext"),
            SecurityProtocol::SaslSsl(_) => write!(f, "sasl_ssl"),
        }
    }
}

impl Display for SaslMechanism {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SaslMechanism::Plain(_) => write!(f, "PLAIN"),
        }
    }
}

// Keeps the api secret out of logs.
impl Debug for PlainCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlainCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
