//! Configuration management for LoanHarmony
//!
//! This module handles loading and validating configuration from environment variables,
//! with support for different environments (development, staging, production).

use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::marketplace::{IntakePolicy, DEFAULT_NOTIFICATION_TTL};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Current environment
    pub environment: Environment,

    /// Server port
    pub port: u16,

    /// CORS allowed origins (comma separated)
    pub cors_allowed_origins: Option<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// How long a notification stays up before it is dismissed
    pub notification_ttl: Duration,

    /// Checking applied to submitted loan requests
    pub intake_policy: IntakePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            port: 3001,
            cors_allowed_origins: None,
            log_level: "info".to_string(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            intake_policy: IntakePolicy::Lenient,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let environment = lookup("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(defaults.environment))?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                ConfigError::InvalidPort(format!("PORT must be a valid number, got '{}'", raw))
            })?,
            None => defaults.port,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").filter(|s| !s.trim().is_empty());

        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);

        let notification_ttl = lookup("NOTIFICATION_TTL_MS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.notification_ttl);

        let intake_policy = match lookup("INTAKE_POLICY") {
            Some(raw) => IntakePolicy::parse(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(format!(
                    "Invalid intake policy: '{}'. Expected: lenient or strict",
                    raw
                ))
            })?,
            None => defaults.intake_policy,
        };

        Ok(Config {
            environment,
            port,
            cors_allowed_origins,
            log_level,
            notification_ttl,
            intake_policy,
        })
    }

    /// Parsed CORS origin list, empty when unset
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
