//! Fuzzes pin state response recognition and parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_pin_state_response

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinio_protocol::{is_pin_state_response, parse_pin_state_response};

fuzz_target!(|data: &[u8]| {
    let recognized = is_pin_state_response(data);
    if let Ok(response) = parse_pin_state_response(data) {
        assert!(recognized);
        let _ = response.analog_value();
    }
});
