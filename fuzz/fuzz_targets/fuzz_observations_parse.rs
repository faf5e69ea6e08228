//! Fuzz target for flip parsing (`--data`, `--data-file`).
//!
//! Parsing must never panic, and accepted input must count consistently.

#![no_main]

use cb_common::Observations;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(obs) = Observations::parse(text) {
        assert_eq!(obs.heads() + obs.tails(), obs.len());
        assert_eq!(obs.to_bits().iter().filter(|b| **b == 1).count(), obs.heads());
    }
});
