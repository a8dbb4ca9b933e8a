//! Fuzz target: `Host` header matching against the default allow-list.

#![no_main]

use greeter_gateway::security::HostAllowList;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(host) = std::str::from_utf8(data) else {
        return;
    };
    let allow = HostAllowList::new(["example.com", "*.example.com"]);
    let _ = allow.allows(host);
});
