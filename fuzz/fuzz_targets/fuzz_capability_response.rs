//! Fuzzes capability response parsing and registry construction.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_capability_response

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinio_core::PinRegistry;
use pinio_protocol::parse_capability_response;

fuzz_target!(|data: &[u8]| {
    let pins = parse_capability_response(data);
    let registry = PinRegistry::from_capabilities(&pins);
    assert!(registry.len() <= pins.len());
});
