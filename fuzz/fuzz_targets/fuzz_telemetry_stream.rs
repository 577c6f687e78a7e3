//! Fuzzes streamed telemetry decoding.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_telemetry_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinio_protocol::decode_stream;

fuzz_target!(|data: &[u8]| {
    let report = decode_stream(data);
    assert_eq!(report.frames.len() * 3 + report.trailing_bytes, data.len());
    for frame in &report.frames {
        let _ = frame.pin_values().count();
    }
});
