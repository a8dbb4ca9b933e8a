//! Environment-driven settings and startup validation.

use std::time::Duration;

use greeter_core::RootVariant;
use tracing::warn;

use crate::rate_limit::RateLimitConfig;

/// Secrets that must be present when the security layer is active.
pub const REQUIRED_SECRETS: [&str; 4] = ["SECRET_KEY", "DATABASE_URL", "JWT_SECRET_KEY", "API_KEY"];

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_ALLOWED_HOSTS: [&str; 2] = ["example.com", "*.example.com"];

/// Errors raised while loading or validating settings.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value '{value}' for {var}: {reason}")]
    Invalid { var: &'static str, value: String, reason: String },

    /// Required secrets are absent in production mode.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingSecrets(Vec<&'static str>),
}

/// Deployment mode, from the `ENVIRONMENT` variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// `ENVIRONMENT=production`.
    Production,
    /// Anything else, including unset.
    #[default]
    Development,
}

impl Environment {
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Secret values read from the environment. Empty values count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    pub secret_key: Option<String>,
    pub database_url: Option<String>,
    pub jwt_secret_key: Option<String>,
    pub api_key: Option<String>,
}

impl Secrets {
    /// Names of the [`REQUIRED_SECRETS`] that are absent.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let present = [
            self.secret_key.is_some(),
            self.database_url.is_some(),
            self.jwt_secret_key.is_some(),
            self.api_key.is_some(),
        ];
        REQUIRED_SECRETS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect()
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("missing", &self.missing())
            .finish_non_exhaustive()
    }
}

/// Complete runtime configuration for the gateway.
#[derive(Debug, Clone)]
pub struct Settings {
    pub listen_addr: String,
    pub root_variant: RootVariant,
    pub environment: Environment,
    pub security_enabled: bool,
    pub secrets: Secrets,
    pub rate_limit: RateLimitConfig,
    pub allowed_hosts: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            root_variant: RootVariant::default(),
            environment: Environment::default(),
            security_enabled: false,
            secrets: Secrets::default(),
            rate_limit: RateLimitConfig::default(),
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| (*h).to_owned()).collect(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if a variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let root_variant = match get("APP_ROOT_VARIANT") {
            Some(v) => v.parse().map_err(|e: greeter_core::CoreError| ConfigError::Invalid {
                var: "APP_ROOT_VARIANT",
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.root_variant,
        };

        let environment = match get("ENVIRONMENT").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        let security_enabled = match get("APP_SECURITY") {
            Some(v) => parse_switch("APP_SECURITY", &v)?,
            None => defaults.security_enabled,
        };

        let max_requests = match get("RATE_LIMIT_REQUESTS") {
            Some(v) => parse_number("RATE_LIMIT_REQUESTS", &v)?,
            None => defaults.rate_limit.max_requests,
        };
        let window = match get("RATE_LIMIT_WINDOW_SECS") {
            Some(v) => Duration::from_secs(parse_number("RATE_LIMIT_WINDOW_SECS", &v)?),
            None => defaults.rate_limit.window,
        };
        if window.is_zero() {
            return Err(ConfigError::Invalid {
                var: "RATE_LIMIT_WINDOW_SECS",
                value: "0".to_owned(),
                reason: "window must be at least one second".to_owned(),
            });
        }

        let allowed_hosts = match get("ALLOWED_HOSTS") {
            Some(v) => v
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_ascii_lowercase)
                .collect(),
            None => defaults.allowed_hosts,
        };

        Ok(Self {
            listen_addr: get("APP_LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            root_variant,
            environment,
            security_enabled,
            secrets: Secrets {
                secret_key: get("SECRET_KEY"),
                database_url: get("DATABASE_URL"),
                jwt_secret_key: get("JWT_SECRET_KEY"),
                api_key: get("API_KEY"),
            },
            rate_limit: RateLimitConfig { max_requests, window },
            allowed_hosts,
        })
    }

    /// Check that every required secret is present.
    ///
    /// Missing secrets are fatal in production. Elsewhere they are logged as
    /// a warning and startup continues.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingSecrets`] in production mode when any
    /// required secret is absent.
    pub fn validate_secrets(&self) -> Result<(), ConfigError> {
        let missing = self.secrets.missing();
        if missing.is_empty() {
            return Ok(());
        }
        if self.environment.is_production() {
            return Err(ConfigError::MissingSecrets(missing));
        }
        warn!(missing = %missing.join(", "), "missing environment variables");
        Ok(())
    }
}

fn parse_switch(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_owned(),
            reason: "expected on/off".to_owned(),
        }),
    }
}

fn parse_number<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_owned(),
        reason: e.to_string(),
    })
}
