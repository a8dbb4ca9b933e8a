//! Greeting request and response bodies.

use serde::{Deserialize, Serialize};

use crate::input::SecureInput;

/// Name used when `/hello` is called without a `name` parameter.
pub const DEFAULT_NAME: &str = "World";

/// Query parameters accepted by `GET /hello`.
///
/// `name` distinguishes "absent" from "empty": `?name=` yields `Some("")`,
/// which is echoed verbatim rather than replaced by [`DEFAULT_NAME`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl GreetingRequest {
    /// Builds a request from decoded query pairs.
    ///
    /// When `name` repeats, the last occurrence wins; other keys are ignored.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let name = pairs
            .into_iter()
            .filter(|(key, _)| key.as_ref() == "name")
            .last()
            .map(|(_, value)| value.into());
        Self { name }
    }

    /// Returns the requested name, or [`DEFAULT_NAME`] when none was given.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }
}

impl SecureInput for GreetingRequest {}

/// Path parameters accepted by `GET /hello/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedGreetingRequest {
    pub name: String,
}

impl SecureInput for NamedGreetingRequest {}

/// `{"message": ...}` body shared by the greeting endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

impl Greeting {
    /// `Hello, {name}` with no trailing punctuation.
    #[must_use]
    pub fn hello(name: &str) -> Self {
        Self { message: format!("Hello, {name}") }
    }

    /// `Hello, {name}!` as served by the path-parameter variant.
    #[must_use]
    pub fn exclaimed(name: &str) -> Self {
        Self { message: format!("Hello, {name}!") }
    }

    /// The fixed `Hello, world` served by the minimal root.
    #[must_use]
    pub fn world() -> Self {
        Self { message: "Hello, world".to_owned() }
    }
}

impl From<&GreetingRequest> for Greeting {
    fn from(req: &GreetingRequest) -> Self {
        Self::hello(req.name())
    }
}

impl From<&NamedGreetingRequest> for Greeting {
    fn from(req: &NamedGreetingRequest) -> Self {
        Self::exclaimed(&req.name)
    }
}
