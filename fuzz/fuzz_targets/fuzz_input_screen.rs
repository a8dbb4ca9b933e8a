//! Fuzz target: SQL-injection screen over arbitrary strings.
//!
//! The screen must never panic, and anything it accepts must be free of
//! the control sequences it is meant to reject.

#![no_main]

use greeter_core::{is_dangerous, screen_str};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = std::str::from_utf8(data) else {
        return;
    };
    if screen_str("fuzz", value).is_ok() {
        assert!(!is_dangerous(value));
        assert!(!value.contains(';'), "accepted input containing ';'");
    }
});
