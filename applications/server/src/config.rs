/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `USERDB_SERVER__PORT=4000`
pub const ENV_PREFIX: &str = "USERDB";

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on handling a single request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How long in-flight requests may drain after a shutdown signal
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// JSON file holding the user store envelope
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl ServerConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `config_path` must exist; otherwise `config.toml` is read
    /// when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let env = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);

        Self::load_with(config_path, env)
    }

    /// Load configuration from an optional file and the given environment source
    pub fn load_with(config_path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match config_path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(env);

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("Server port must not be 0".to_string()));
        }

        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(ServerError::Config(format!(
                "Server host is not an IP address: {}",
                self.server.host
            )));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ServerError::Config(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }

        if self.server.shutdown_timeout_secs == 0 {
            return Err(ServerError::Config(
                "Shutdown timeout must be at least 1 second".to_string(),
            ));
        }

        if self.storage.path.as_os_str().is_empty() {
            return Err(ServerError::Config(
                "Storage path is required (set USERDB_STORAGE__PATH)".to_string(),
            ));
        }

        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip = self
            .server
            .host
            .parse::<IpAddr>()
            .map_err(|e| ServerError::Config(format!("Invalid host {}: {}", self.server.host, e)))?;
        Ok(SocketAddr::from((ip, self.server.port)))
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        request_timeout_secs: default_request_timeout_secs(),
        shutdown_timeout_secs: default_shutdown_timeout_secs(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3333
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_shutdown_timeout_secs() -> u64 {
    30
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        path: default_store_path(),
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("users.json")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
        }
    }
}
