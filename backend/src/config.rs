use thiserror::Error;

use crate::domain::models::diary::DiaryType;

/// A configuration value that could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("ENABLED_DIARY_TYPES contains unknown diary type '{0}'")]
    UnknownDiaryType(String),
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Diary types enabled at startup (default: all).
    pub enabled_diary_types: Vec<DiaryType>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `HOST`                | `127.0.0.1`             |
    /// | `PORT`                | `3000`                  |
    /// | `CORS_ORIGINS`        | `http://localhost:8080` |
    /// | `ENABLED_DIARY_TYPES` | every diary type        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());

        let port_value = lookup("PORT").unwrap_or_else(|| "3000".into());
        let port: u16 = port_value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: "PORT",
            expected: "u16",
            value: port_value.clone(),
        })?;

        let cors_origins = split_list(
            &lookup("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:8080".into()),
        );

        let enabled_diary_types = match lookup("ENABLED_DIARY_TYPES") {
            Some(value) => split_list(&value)
                .iter()
                .map(|name| {
                    name.parse::<DiaryType>()
                        .map_err(|_| ConfigError::UnknownDiaryType(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => DiaryType::ALL.to_vec(),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            enabled_diary_types,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: vec!["http://localhost:8080".to_string()],
            enabled_diary_types: DiaryType::ALL.to_vec(),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
