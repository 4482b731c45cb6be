//! Server configuration
//!
//! Layered in this order, later layers winning: built-in defaults, an
//! optional TOML file, environment variables, command-line flags.

use securetag_core::{IssuePolicy, SeedRecord, DEFAULT_AUDIT_CAPACITY, VALID_DAYS_LIMIT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Port used when neither the config nor the environment picks one
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`ServerConfig`]
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that was requested
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },

    /// An environment variable held an unusable value
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Variable name
        key: String,
        /// Rejected value
        value: String,
    },

    /// The merged configuration is inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Deployment environment; controls error detail in 500 responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Panic messages are returned to clients
    Development,
    /// Panic messages are replaced with a generic message
    #[default]
    Production,
}

impl Environment {
    /// Whether internal error details may be shown to clients
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidValue {
                key: "environment".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Full server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Deployment environment
    pub environment: Environment,
    /// Audit log capacity
    pub audit_capacity: usize,
    /// Validity for issued tags when the request gives none
    pub default_valid_days: u32,
    /// Largest validity accepted by the issuer
    pub max_valid_days: u32,
    /// Application name reported to clients
    pub app_name: String,
    /// Version reported by the health endpoint
    pub version: String,
    /// Public API base URL handed to browser clients
    pub api_base_url: Option<String>,
    /// Seed the built-in demo registry at startup
    pub seed_demo_records: bool,
    /// Advertise the demo QR codes in health and client-config responses
    pub expose_test_codes: bool,
    /// Extra records to register at startup
    pub records: Vec<SeedRecord>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let policy = IssuePolicy::default();
        Self {
            bind: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            environment: Environment::default(),
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
            default_valid_days: policy.default_valid_days,
            max_valid_days: policy.max_valid_days,
            app_name: "SecureTag".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            api_base_url: None,
            seed_demo_records: true,
            expose_test_codes: true,
            records: Vec::new(),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        })
}

impl ServerConfig {
    /// Defaults, then `path` if given, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_with_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `SECURETAG_BIND`, `PORT`, `SECURETAG_ENV` and
    /// `SECURETAG_AUDIT_CAPACITY`, read through `lookup`
    pub fn merge_with_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(bind) = lookup("SECURETAG_BIND") {
            self.bind = parse_env("SECURETAG_BIND", bind)?;
        }
        if let Some(port) = lookup("PORT") {
            self.bind.set_port(parse_env("PORT", port)?);
        }
        if let Some(env) = lookup("SECURETAG_ENV") {
            self.environment = parse_env("SECURETAG_ENV", env)?;
        }
        if let Some(capacity) = lookup("SECURETAG_AUDIT_CAPACITY") {
            self.audit_capacity = parse_env("SECURETAG_AUDIT_CAPACITY", capacity)?;
        }
        Ok(())
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.audit_capacity == 0 {
            return Err(ConfigError::Invalid(
                "audit_capacity must be at least 1".to_string(),
            ));
        }
        if self.max_valid_days == 0 {
            return Err(ConfigError::Invalid(
                "max_valid_days must be at least 1".to_string(),
            ));
        }
        if self.max_valid_days > VALID_DAYS_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_valid_days ({}) exceeds the limit of {VALID_DAYS_LIMIT}",
                self.max_valid_days
            )));
        }
        if self.default_valid_days > self.max_valid_days {
            return Err(ConfigError::Invalid(format!(
                "default_valid_days ({}) exceeds max_valid_days ({})",
                self.default_valid_days, self.max_valid_days
            )));
        }
        Ok(())
    }

    /// Issuing bounds derived from this config
    pub fn issue_policy(&self) -> IssuePolicy {
        IssuePolicy {
            default_valid_days: self.default_valid_days,
            max_valid_days: self.max_valid_days,
        }
    }

    /// API base URL advertised to browser clients
    pub fn public_api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| "/api".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.bind.port(), DEFAULT_PORT);
        assert_eq!(config.audit_capacity, 1000);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServerConfig::default();
        config
            .merge_with_env(env(&[
                ("PORT", "8080"),
                ("SECURETAG_ENV", "Development"),
                ("SECURETAG_AUDIT_CAPACITY", "100"),
            ]))
            .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert!(config.environment.is_development());
        assert_eq!(config.audit_capacity, 100);
    }

    #[test]
    fn test_bad_env_value_is_reported() {
        let mut config = ServerConfig::default();
        let err = config.merge_with_env(env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn test_validate_rejects_inconsistent_days() {
        let config = ServerConfig {
            default_valid_days: 40,
            max_valid_days: 30,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ServerConfig {
            audit_capacity: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_max_valid_days() {
        let config = ServerConfig {
            max_valid_days: VALID_DAYS_LIMIT,
            ..ServerConfig::default()
        };
        config.validate().unwrap();

        let config = ServerConfig {
            max_valid_days: u32::MAX,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_toml_file_with_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
bind = "127.0.0.1:4000"
environment = "development"
audit_capacity = 100
seed_demo_records = false

[[records]]
id = "LAB-0001"
name = "Ada Lovelace"
department = "Lab"
access_level = "Level 4"
valid_days = 10

[[records]]
id = "04:11:22:33"
kind = "nfc"
name = "Alan Turing"
department = "Lab"
access_level = "Level 2"
valid_until = "2030-01-01T00:00:00Z"
issue_token = false
tag_type = "NTAG215"
"#
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind.port(), 4000);
        assert_eq!(config.audit_capacity, 100);
        assert!(!config.seed_demo_records);
        assert_eq!(config.records.len(), 2);
        assert_eq!(config.records[1].kind, securetag_core::TagKind::Nfc);
        assert_eq!(config.default_valid_days, 30);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "audit_capacty = 5").unwrap();
        assert!(matches!(
            ServerConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = ServerConfig::from_file(Path::new("/nonexistent/securetag.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
