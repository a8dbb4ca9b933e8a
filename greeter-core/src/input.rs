//! Base validation rule for structured request input.
//!
//! Every string field reachable from a [`SecureInput`] value is screened for
//! SQL-injection-indicative content. This is a single pattern pass, not a
//! sanitiser: matching input is rejected, never rewritten.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Maximum accepted length, in characters, of a screened string field.
pub const MAX_INPUT_LEN: usize = 1024;

/// SQL keywords rejected when they appear as a whole word.
#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static SQL_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(select|insert|update|delete|drop|union|create|alter)\b")
        .expect("keyword pattern compiles")
});

/// Control sequences rejected wherever they appear.
#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static SQL_SEQUENCES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(--|;|/\*|\*/|xp_|sp_|0x)").expect("sequence pattern compiles")
});

/// Screens a single string value.
///
/// Leading and trailing whitespace is ignored for the length limit. Matching
/// is case-insensitive.
///
/// # Errors
/// Returns [`CoreError::InputTooLong`] or [`CoreError::DangerousInput`].
pub fn screen_str(field: &str, value: &str) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if len > MAX_INPUT_LEN {
        return Err(CoreError::InputTooLong { field: field.to_owned(), len, max: MAX_INPUT_LEN });
    }
    if is_dangerous(value) {
        return Err(CoreError::DangerousInput { field: field.to_owned() });
    }
    Ok(())
}

/// Returns `true` if `value` contains a whole-word SQL keyword or a SQL
/// control sequence.
#[must_use]
pub fn is_dangerous(value: &str) -> bool {
    let folded = fold_ascii_lookalikes(value);
    SQL_SEQUENCES.is_match(&folded) || SQL_KEYWORDS.is_match(&folded)
}

/// Maps letters that case-fold onto ASCII outside simple case folding.
///
/// Each replacement is one word character for one word character, so word
/// boundaries are unchanged.
fn fold_ascii_lookalikes(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '\u{17F}' => 's',
            '\u{130}' | '\u{131}' => 'i',
            '\u{212A}' => 'k',
            other => other,
        })
        .collect()
}

/// Structured input whose string fields must pass [`screen_str`].
///
/// Implementors only need `Serialize`; the default method walks the
/// serialised form so nested objects and arrays are covered too.
pub trait SecureInput: Serialize {
    /// Screens every string field.
    ///
    /// # Errors
    /// Returns the first screening failure, naming the offending field by
    /// its dotted path.
    fn screen(&self) -> Result<(), CoreError> {
        let value = serde_json::to_value(self)?;
        screen_value("input", &value)
    }
}

fn screen_value(path: &str, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::String(s) => screen_str(path, s),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| screen_value(&format!("{path}[{i}]"), item)),
        Value::Object(map) => map.iter().try_for_each(|(key, item)| {
            let child = if path == "input" { key.clone() } else { format!("{path}.{key}") };
            screen_value(&child, item)
        }),
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(()),
    }
}
