use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

/// The run mode only picks the default listening port: 3001 for test runs,
/// 3000 otherwise. An explicit `server.port` overrides both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Default,
    Test,
}

impl Default for RunMode {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: Option<u16>,
    #[serde(default)]
    pub mode: RunMode,
}

impl ServerConfig {
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(match self.mode {
            RunMode::Test => 3001,
            RunMode::Default => 3000,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::from(
                PathBuf::from(&config_dir).join("default.toml"),
            ))
            .add_source(
                config::File::from(PathBuf::from(&config_dir).join("local.toml")).required(false),
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_config(port: Option<u16>, mode: RunMode) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            mode,
        }
    }

    #[test]
    fn test_default_mode_listens_on_3000() {
        assert_eq!(server_config(None, RunMode::Default).effective_port(), 3000);
    }

    #[test]
    fn test_test_mode_listens_on_3001() {
        assert_eq!(server_config(None, RunMode::Test).effective_port(), 3001);
    }

    #[test]
    fn test_explicit_port_wins_over_mode() {
        assert_eq!(
            server_config(Some(8080), RunMode::Test).effective_port(),
            8080
        );
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: RunMode = serde_json::from_str(r#""test""#).unwrap();
        assert_eq!(mode, RunMode::Test);
    }
}
