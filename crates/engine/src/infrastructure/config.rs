//! Engine configuration

use std::env;
use std::str::FromStr;

/// Engine configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Bind host
    pub server_host: String,
    /// Bind port
    pub server_port: u16,

    /// CORS allowed origins (comma-separated, or "*" for any). Unset disables CORS.
    pub cors_allowed_origins: Option<String>,

    /// Roll history configuration
    pub history: HistoryConfig,
}

/// Roll history configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Records kept before the oldest is evicted
    pub capacity: usize,
    /// Records returned when a history request names no limit
    pub default_limit: usize,
    /// Upper clamp on a requested limit
    pub max_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            default_limit: 50,
            max_limit: 1000,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            cors_allowed_origins: None,
            history: HistoryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_port = match var("SERVER_PORT") {
            Some(value) => parse("SERVER_PORT", value)?,
            None => match var("PORT") {
                Some(value) => parse("PORT", value)?,
                None => defaults.server_port,
            },
        };

        let history = HistoryConfig {
            capacity: parse_or(
                "DICE_HISTORY_CAPACITY",
                var("DICE_HISTORY_CAPACITY"),
                defaults.history.capacity,
            )?,
            default_limit: parse_or(
                "DICE_HISTORY_DEFAULT_LIMIT",
                var("DICE_HISTORY_DEFAULT_LIMIT"),
                defaults.history.default_limit,
            )?,
            max_limit: parse_or(
                "DICE_HISTORY_MAX_LIMIT",
                var("DICE_HISTORY_MAX_LIMIT"),
                defaults.history.max_limit,
            )?,
        };
        if history.capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "DICE_HISTORY_CAPACITY",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
            history,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}

fn parse_or<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |v| parse(var, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<EngineConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DICE_HISTORY_CAPACITY", "5"),
            ("DICE_HISTORY_DEFAULT_LIMIT", "2"),
            ("CORS_ALLOWED_ORIGINS", " * "),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.history.capacity, 5);
        assert_eq!(config.history.default_limit, 2);
        assert_eq!(config.history.max_limit, 1000);
        assert_eq!(config.cors_allowed_origins.as_deref(), Some("*"));
    }

    #[test]
    fn test_server_port_wins_over_port() {
        let config = load(&[("SERVER_PORT", "3000"), ("PORT", "9000")]).unwrap();
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(matches!(
            load(&[("SERVER_PORT", "http")]),
            Err(ConfigError::Invalid { var: "SERVER_PORT", .. })
        ));
        assert!(matches!(
            load(&[("DICE_HISTORY_CAPACITY", "0")]),
            Err(ConfigError::Invalid { var: "DICE_HISTORY_CAPACITY", .. })
        ));
        assert!(matches!(
            load(&[("DICE_HISTORY_MAX_LIMIT", "-1")]),
            Err(ConfigError::Invalid { var: "DICE_HISTORY_MAX_LIMIT", .. })
        ));
    }
}
