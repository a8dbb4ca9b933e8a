//! Fuzz target: JSON deserialization and screening of `GreetingRequest`.
//!
//! Errors are expected; panics are not.

#![no_main]

use greeter_core::{Greeting, GreetingRequest, SecureInput};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(req) = serde_json::from_slice::<GreetingRequest>(data) {
        let _ = req.screen();
        let greeting = Greeting::from(&req);
        assert!(greeting.message.starts_with("Hello, "));
    }
});
