//! Daemon configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults,
//! the optional `roombook.toml` in the working directory, then `ROOMBOOK_*`
//! environment variables (plus `RUST_LOG` for the log filter).

use std::path::Path;

use serde::Deserialize;

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "roombook.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub notifications: NotificationsConfig,
    pub rooms: RoomsConfig,
}

/// HTTP listener.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Room store location and pool size.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Log filter in `RUST_LOG` syntax.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

/// Notification bus.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Notices a subscriber may fall behind before it starts missing some.
    pub channel_capacity: usize,
    /// Write every published notice to the log.
    pub log_deliveries: bool,
}

/// Room inventory bootstrap.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoomsConfig {
    /// Room ids registered at startup unless they already exist.
    pub seed: Vec<String>,
}

impl Config {
    /// Load defaults, then `roombook.toml` if present, then the process
    /// environment, and validate the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, an
    /// environment override is malformed, or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Path::new(CONFIG_FILE), |name| std::env::var(name).ok())
    }

    fn load_with(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(ConfigError::Io(err)),
        };
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(host) = env("ROOMBOOK_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env("ROOMBOOK_PORT") {
            self.server.port = parse_port("ROOMBOOK_PORT", &port)?;
        }
        if let Some(bind) = env("ROOMBOOK_BIND") {
            let Some((host, port)) = bind.rsplit_once(':') else {
                return Err(ConfigError::Env {
                    var: "ROOMBOOK_BIND",
                    value: bind,
                });
            };
            self.server.port = parse_port("ROOMBOOK_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(url) = env("ROOMBOOK_DATABASE_URL") {
            self.database.url = url;
        }
        // RUST_LOG is the more specific knob and wins over ROOMBOOK_LOG.
        if let Some(filter) = env("RUST_LOG").or_else(|| env("ROOMBOOK_LOG")) {
            self.logging.filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database max_connections must be non-zero",
            ));
        }
        if self.notifications.channel_capacity == 0 {
            return Err(ConfigError::Validation(
                "notification channel capacity must be non-zero",
            ));
        }
        if self.rooms.seed.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::Validation("seed room ids cannot be empty"));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_port(var: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|_| ConfigError::Env {
        var,
        value: value.to_string(),
    })
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:roombook.db?mode=rwc".to_string(),
            max_connections: roombook_adapter_storage_sqlite_sqlx::pool::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roombookd=info,roombook_app=info,roombook_adapter_http_axum=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            log_deliveries: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}
