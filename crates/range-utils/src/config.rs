//! Application environment configuration

use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployment environment of the hosting process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse an environment name; anything but "development" counts as production
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("development") {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name
    pub app_name: String,
    /// Environment (development or production)
    pub environment: Environment,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "range-bot".to_string(),
            environment: Environment::Development,
        }
    }
}

impl AppConfig {
    /// Read the environment from `APP_ENV`, falling back to `NODE_ENV`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map_or(Environment::Development, |name| Environment::from_name(&name));

        Self {
            environment,
            ..Self::default()
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Log format suited to the environment
    pub fn log_format(&self) -> LogFormat {
        match self.environment {
            Environment::Development => LogFormat::Pretty,
            Environment::Production => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_development() {
        let config = AppConfig::from_lookup(|_| None);
        assert!(config.is_development());
        assert_eq!(config.log_format(), LogFormat::Pretty);
    }

    #[test]
    fn test_app_env_wins_over_node_env() {
        let config = AppConfig::from_lookup(|key| match key {
            "APP_ENV" => Some("production".to_string()),
            "NODE_ENV" => Some("development".to_string()),
            _ => None,
        });
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_node_env_fallback() {
        let config =
            AppConfig::from_lookup(|key| (key == "NODE_ENV").then(|| "Development".to_string()));
        assert!(config.is_development());
        assert_eq!(config.environment.to_string(), "development");
    }
}
