//! Drives a manager through discovery and telemetry with arbitrary bytes.
//!
//! The first byte picks the starting state, the rest is split into reads.
//! Inbound handling must never panic and the registry indexes must stay
//! consistent.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_manager_receive

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinio_core::{NullSink, NullTimer, PinIoManager};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };

    let mut manager = PinIoManager::new(Vec::<Vec<u8>>::new(), NullTimer, NullSink);
    match selector % 3 {
        0 => manager.query_capabilities(),
        1 => manager.end_query(true),
        _ => {}
    }

    let chunk = usize::from(selector / 3).max(1);
    for read in rest.chunks(chunk) {
        manager.receive(read);
    }
    if manager.is_querying_capabilities() {
        manager.end_query(true);
    }

    for pin in manager.registry() {
        assert_eq!(
            manager.registry().get(pin.digital_id()).map(|p| p.digital_id()),
            Some(pin.digital_id())
        );
        if let Some(analog_id) = pin.analog_id() {
            assert_eq!(
                manager.registry().by_analog(analog_id).map(|p| p.digital_id()),
                Some(pin.digital_id())
            );
        }
    }
});
