//! Core types for the greeter demonstration service.
//!
//! Defines the response records served by the HTTP surface, the base input
//! screening rule, and API key verification. Nothing here performs I/O.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod api_key;
pub mod error;
pub mod greeting;
pub mod input;
pub mod status;
pub mod version;

pub use api_key::{verify_api_key, ApiKey, API_KEY_HEADER};
pub use error::CoreError;
pub use greeting::{Greeting, GreetingRequest, NamedGreetingRequest, DEFAULT_NAME};
pub use input::{is_dangerous, screen_str, SecureInput, MAX_INPUT_LEN};
pub use status::{HealthStatus, MetricsSnapshot, RootBody, RootInfo, RootVariant, SERVICE_NAME};
pub use version::{SemVer, API_VERSION};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn greeting_request_absent_name_defaults_to_world() {
        let req = GreetingRequest::default();
        assert_eq!(Greeting::from(&req).message, "Hello, World");
    }

    #[test]
    fn greeting_request_empty_name_is_not_defaulted() {
        let req = GreetingRequest { name: Some(String::new()) };
        assert_eq!(Greeting::from(&req).message, "Hello, ");
    }

    #[test]
    fn greeting_request_from_pairs_keeps_last_name() {
        let req = GreetingRequest::from_query_pairs([("name", "a"), ("lang", "en"), ("name", "b")]);
        assert_eq!(req.name.as_deref(), Some("b"));

        let none = GreetingRequest::from_query_pairs([("lang", "en")]);
        assert_eq!(none.name, None, "absent name must stay absent");

        let empty = GreetingRequest::from_query_pairs([("name", "")]);
        assert_eq!(empty.name.as_deref(), Some(""), "empty name must not be defaulted");
    }

    #[test]
    fn named_greeting_appends_exclamation() {
        let req = NamedGreetingRequest { name: "Test-User_123".to_owned() };
        assert_eq!(Greeting::from(&req).message, "Hello, Test-User_123!");
    }

    #[test]
    fn health_status_is_fixed_payload() {
        let json = match serde_json::to_value(HealthStatus::healthy()) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, serde_json::json!({"status": "healthy", "service": "fastapi-app"}));
    }

    #[test]
    fn root_variants_serialize_to_distinct_shapes() {
        let minimal = match serde_json::to_value(RootVariant::Minimal.body()) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(minimal, serde_json::json!({"message": "Hello, world"}));

        let info = match serde_json::to_value(RootVariant::Info.body()) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(info["version"], "1.0.0");
        assert_eq!(info["documentation"], "/docs");
        assert_eq!(info["health"], "/health");
        assert!(info["message"].is_string(), "info record must carry a message");
    }

    #[test]
    fn root_variant_parses_case_insensitively() {
        assert!(matches!("Info".parse::<RootVariant>(), Ok(RootVariant::Info)));
        assert!(matches!(" minimal ".parse::<RootVariant>(), Ok(RootVariant::Minimal)));
        assert!(matches!(
            "verbose".parse::<RootVariant>(),
            Err(CoreError::UnknownRootVariant(v)) if v == "verbose"
        ));
    }

    #[test]
    fn metrics_snapshot_has_four_numeric_fields() {
        let json = match serde_json::to_value(MetricsSnapshot::fixed()) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        for key in ["requests_total", "requests_per_second", "response_time_ms", "active_connections"] {
            assert!(json[key].is_u64(), "{key} must be an integer");
        }
        assert_eq!(MetricsSnapshot::fixed(), MetricsSnapshot::fixed());
    }

    #[test]
    fn semver_display_formats_correctly() {
        assert_eq!(SemVer(1, 2, 3).to_string(), "1.2.3");
        assert!(SemVer(1, 10, 0) > SemVer(1, 9, 9), "components compare numerically");
        assert_eq!(API_VERSION.to_string(), "1.0.0");
    }

    proptest! {
        #[test]
        fn greeting_echoes_any_name_verbatim(name in ".*") {
            let req = GreetingRequest { name: Some(name.clone()) };
            prop_assert_eq!(Greeting::from(&req).message, format!("Hello, {name}"));
        }

        #[test]
        fn named_greeting_always_ends_with_bang(name in "[A-Za-z0-9_-]{1,32}") {
            let req = NamedGreetingRequest { name: name.clone() };
            prop_assert_eq!(Greeting::from(&req).message, format!("Hello, {name}!"));
        }
    }
}
