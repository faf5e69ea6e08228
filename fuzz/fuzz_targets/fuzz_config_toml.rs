//! Fuzz target for config.toml parsing and validation.
//!
//! Tests that settings parsing handles arbitrary input without panicking.

#![no_main]

use cb_config::{validate_settings, Settings};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Should never panic, only return an error
    if let Ok(settings) = toml::from_str::<Settings>(text) {
        let _ = validate_settings(&settings);
    }
});
