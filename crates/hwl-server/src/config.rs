use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const ENV_PORT: &str = "HOSPITAL_API_PORT";
pub const ENV_ENVIRONMENT: &str = "HOSPITAL_API_ENVIRONMENT";
pub const ENV_DATA_DIR: &str = "HOSPITAL_API_DATA_DIR";
pub const ENV_REQUEST_TIMEOUT: &str = "HOSPITAL_API_REQUEST_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// `production` turns off debug logging; anything else is development.
    pub environment: String,
    pub request_timeout_secs: u64,
    pub storage: StorageConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            environment: "development".into(),
            request_timeout_secs: 30,
            storage: StorageConfig::Memory,
        }
    }
}

/// Where hospitals are kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    Memory,
    File { data_dir: PathBuf },
}

impl ServerConfig {
    pub fn from_toml_str(source: &str) -> ServerResult<Self> {
        toml::from_str(source).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Apply `HOSPITAL_API_*` overrides read through `lookup`, usually
    /// `std::env::var`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> ServerResult<Self> {
        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            let port: u16 = port
                .parse()
                .map_err(|_| ServerError::Config(format!("{ENV_PORT}: invalid port {port:?}")))?;
            self.bind_addr.set_port(port);
        }
        if let Some(environment) = lookup(ENV_ENVIRONMENT).filter(|v| !v.is_empty()) {
            self.environment = environment;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.storage = StorageConfig::File {
                data_dir: PathBuf::from(dir),
            };
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT).filter(|v| !v.is_empty()) {
            self.request_timeout_secs = secs.parse().map_err(|_| {
                ServerError::Config(format!("{ENV_REQUEST_TIMEOUT}: invalid number {secs:?}"))
            })?;
        }
        Ok(self)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.storage, StorageConfig::Memory);
        assert_eq!(c.request_timeout(), Duration::from_secs(30));
        assert!(!c.is_production());
    }

    #[test]
    fn toml_with_file_storage() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "127.0.0.1:9000"
            environment = "Production"

            [storage]
            backend = "file"
            data_dir = "/var/lib/hwl"
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
        assert!(c.is_production());
        assert_eq!(
            c.storage,
            StorageConfig::File {
                data_dir: PathBuf::from("/var/lib/hwl")
            }
        );
        assert_eq!(c.request_timeout_secs, 30);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str("request_timeout_secs = 5").unwrap();
        assert_eq!(c.request_timeout(), Duration::from_secs(5));
        assert_eq!(c.storage, StorageConfig::Memory);
    }

    #[test]
    fn printed_config_loads_back() {
        let config = ServerConfig {
            storage: StorageConfig::File {
                data_dir: PathBuf::from("data"),
            },
            ..ServerConfig::default()
        };
        let printed = toml::to_string_pretty(&config).unwrap();
        assert_eq!(ServerConfig::from_toml_str(&printed).unwrap(), config);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn env_overrides() {
        let c = ServerConfig::default()
            .with_overrides(env(&[
                (ENV_PORT, "8181"),
                (ENV_ENVIRONMENT, "production"),
                (ENV_DATA_DIR, "/tmp/hospitals"),
                (ENV_REQUEST_TIMEOUT, "3"),
            ]))
            .unwrap();
        assert_eq!(c.bind_addr.port(), 8181);
        assert!(c.is_production());
        assert!(matches!(c.storage, StorageConfig::File { .. }));
        assert_eq!(c.request_timeout_secs, 3);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let c = ServerConfig::default()
            .with_overrides(env(&[(ENV_PORT, ""), (ENV_ENVIRONMENT, "")]))
            .unwrap();
        assert_eq!(c, ServerConfig::default());
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = ServerConfig::default()
            .with_overrides(env(&[(ENV_PORT, "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_PORT));
    }
}
