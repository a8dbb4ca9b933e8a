//! HTTP gateway for the greeter demonstration service.
//!
//! Serves the greeting, health, root and metrics endpoints, optionally behind
//! a chain of security interceptors selected by configuration.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod security;
