//! Fixed records served by the informational endpoints.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::CoreError, greeting::Greeting, version::API_VERSION};

/// Service name reported by the liveness probe.
pub const SERVICE_NAME: &str = "fastapi-app";

/// Liveness payload returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

impl HealthStatus {
    /// The only health state this service reports.
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "healthy".to_owned(), service: SERVICE_NAME.to_owned() }
    }
}

/// Structured info record served at `/` by the [`RootVariant::Info`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootInfo {
    pub message: String,
    pub version: String,
    pub documentation: String,
    pub health: String,
}

impl RootInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            message: "Welcome to the greeter API".to_owned(),
            version: API_VERSION.to_string(),
            documentation: "/docs".to_owned(),
            health: "/health".to_owned(),
        }
    }
}

/// Which body the root endpoint serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum RootVariant {
    /// `{"message": "Hello, world"}`.
    #[default]
    Minimal,
    /// A [`RootInfo`] record.
    Info,
}

impl RootVariant {
    /// Builds the root body for this variant.
    #[must_use]
    pub fn body(self) -> RootBody {
        match self {
            RootVariant::Minimal => RootBody::Minimal(Greeting::world()),
            RootVariant::Info => RootBody::Info(RootInfo::current()),
        }
    }
}

impl FromStr for RootVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(RootVariant::Minimal),
            "info" => Ok(RootVariant::Info),
            other => Err(CoreError::UnknownRootVariant(other.to_owned())),
        }
    }
}

impl fmt::Display for RootVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootVariant::Minimal => f.write_str("minimal"),
            RootVariant::Info => f.write_str("info"),
        }
    }
}

/// Root response body; serialises as whichever record the variant selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RootBody {
    Minimal(Greeting),
    Info(RootInfo),
}

/// Hardcoded numbers served by `GET /metrics`. Nothing is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub requests_per_second: u64,
    pub response_time_ms: u64,
    pub active_connections: u64,
}

impl MetricsSnapshot {
    /// The constant snapshot. Identical on every call.
    #[must_use]
    pub const fn fixed() -> Self {
        Self {
            requests_total: 1000,
            requests_per_second: 10,
            response_time_ms: 50,
            active_connections: 5,
        }
    }
}
