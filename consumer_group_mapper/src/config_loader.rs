use regex::{Captures, Regex};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

pub const BOOTSTRAP_ENDPOINT_PATH: &str = "confluent/cluster/bootstrap_endpoint";
pub const API_KEY_PATH: &str = "confluent/cluster/api_key";
pub const API_SECRET_PATH: &str = "confluent/cluster/api_secret";
pub const SECURITY_PROTOCOL_PATH: &str = "confluent/cluster/security_protocol";

// Expansion only kicks in for values holding a braced placeholder.
static BRACED_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}{]+)\}").expect("braced var pattern is valid"));

static ANY_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([^}]*)\}|([A-Za-z0-9_]+))").expect("var pattern is valid")
});

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("While reading config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("While parsing config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Key '{0}' not found in config")]
    MissingKey(String),
    #[error("Key '{0}' is not a string")]
    NotAString(String),
    #[error("Key '{path}' has unsupported value '{value}'")]
    InvalidValue { path: String, value: String },
}

/// Parsed configuration document with `${VAR}` placeholders already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    root: Value,
}

impl ConfigTree {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Looks up a `/` separated path, e.g. `confluent/cluster/api_key`.
    pub fn get(&self, path: &str) -> Result<&Value, ConfigError> {
        let mut current = &self.root;
        for segment in path.split('/').filter(|x| !x.is_empty()) {
            current = match current {
                Value::Mapping(mapping) => mapping.get(segment),
                Value::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
            .ok_or_else(|| ConfigError::MissingKey(path.to_owned()))?;
        }

        Ok(current)
    }

    pub fn get_str(&self, path: &str) -> Result<&str, ConfigError> {
        self.get(path)?
            .as_str()
            .ok_or_else(|| ConfigError::NotAString(path.to_owned()))
    }

    /// Like [`ConfigTree::get_str`], but a missing key is `None`.
    pub fn find_str(&self, path: &str) -> Result<Option<&str>, ConfigError> {
        match self.get_str(path) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::MissingKey(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Reads a YAML file and expands environment variables inside string values.
///
/// The file is re-read and the environment re-resolved on every call.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigTree, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content, |name| std::env::var(name).ok()).map_err(|source| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}

pub fn parse_config<F>(content: &str, lookup: F) -> Result<ConfigTree, serde_yaml::Error>
where
    F: Fn(&str) -> Option<String>,
{
    let mut root: Value = serde_yaml::from_str(content)?;
    expand_tree(&mut root, &lookup);

    Ok(ConfigTree::new(root))
}

fn expand_tree<F>(value: &mut Value, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    match value {
        Value::String(s) => {
            if let Some(expanded) = expand_env_vars_with(s, lookup) {
                *s = expanded;
            }
        }
        Value::Sequence(items) => items.iter_mut().for_each(|x| expand_tree(x, lookup)),
        Value::Mapping(mapping) => mapping
            .iter_mut()
            .for_each(|(_, x)| expand_tree(x, lookup)),
        Value::Tagged(tagged) => expand_tree(&mut tagged.value, lookup),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Returns `None` when the value has no `${NAME}` placeholder. Otherwise both
/// `${NAME}` and bare `$NAME` are expanded; unset variables are kept as they are.
pub fn expand_env_vars_with<F>(value: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if !BRACED_VAR_PATTERN.is_match(value) {
        return None;
    }

    let expanded = ANY_VAR_PATTERN.replace_all(value, |caps: &Captures| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|x| x.as_str())
            .unwrap_or_default();
        lookup(name).unwrap_or_else(|| caps[0].to_owned())
    });

    Some(expanded.into_owned())
}
