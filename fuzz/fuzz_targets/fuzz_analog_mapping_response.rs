//! Fuzzes analog mapping response parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_analog_mapping_response

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinio_protocol::parse_analog_mapping_response;

fuzz_target!(|data: &[u8]| {
    let mapping = parse_analog_mapping_response(data);
    for (digital_id, channel) in mapping.entries() {
        assert_eq!(mapping.channel_for(*digital_id), Some(*channel));
    }
});
