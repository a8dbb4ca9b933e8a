/// Errors produced by the `greeter-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A string field matched a SQL-injection-indicative pattern.
    #[error("potentially dangerous input detected in field '{field}'")]
    DangerousInput { field: String },

    /// A string field exceeded the maximum accepted length.
    #[error("field '{field}' is {len} characters long; at most {max} allowed")]
    InputTooLong { field: String, len: usize, max: usize },

    /// Structured input could not be converted for screening.
    #[error("input could not be inspected: {0}")]
    Uninspectable(#[from] serde_json::Error),

    /// No API key was presented on a protected route.
    #[error("API key required")]
    ApiKeyMissing,

    /// The presented API key does not match the configured secret.
    #[error("Invalid API key")]
    ApiKeyInvalid,

    /// A root variant name was not recognised.
    #[error("unknown root variant '{0}'; expected 'minimal' or 'info'")]
    UnknownRootVariant(String),
}
