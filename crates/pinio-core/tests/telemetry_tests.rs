//! Inbound telemetry: streamed reports and pin state responses.

use pinio_core::{DigitalValue, PinIoEvent, PinMode, PinRecord};
use pinio_test_helpers::prelude::*;

fn digital_values(manager: &TestManager, ids: std::ops::RangeInclusive<u8>) -> Vec<DigitalValue> {
    ids.map(|id| {
        must_some(manager.registry().get(id), "pin present").digital_value()
    })
    .collect()
}

#[test]
fn test_digital_port_report_updates_eight_pins() {
    let mut manager = discovered_uno_manager();
    manager.receive(&digital_report(1, 0b1010_0101));

    use DigitalValue::{High, Low};
    assert_eq!(
        digital_values(&manager, 8..=15),
        [High, Low, High, Low, Low, High, Low, High]
    );
    assert_eq!(manager.events(), &vec![PinIoEvent::PinStateUpdated]);
}

#[test]
fn test_digital_report_skips_unknown_pins() {
    let mut manager = default_layout_manager();
    // Port 0 covers pins 0..=7; only 3..=7 exist in the default layout.
    manager.receive(&digital_report(0, 0xFF));
    assert_eq!(
        digital_values(&manager, 3..=7),
        vec![DigitalValue::High; 5]
    );
    assert!(manager.registry().get(0).is_none());
    // Port 2 covers pins 16..=23; only 16..=19 exist.
    manager.receive(&digital_report(2, 0xFF));
    assert_eq!(
        digital_values(&manager, 16..=19),
        vec![DigitalValue::High; 4]
    );
}

#[test]
fn test_analog_report_updates_only_matching_channel() {
    let mut manager = discovered_uno_manager();
    let before = manager.registry().pins().to_vec();

    manager.receive(&analog_report(3, 612));

    for (old, new) in before.iter().zip(manager.registry().pins()) {
        if old.analog_id() == Some(3) {
            assert_eq!(new.digital_id(), 17);
            assert_eq!(new.analog_value(), 612);
        } else {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn test_analog_report_ignores_mode() {
    let mut manager = discovered_uno_manager();
    // Pin 14 is still in input mode; the value is applied anyway.
    manager.receive(&analog_report(0, 1023));
    assert_eq!(
        manager.registry().get(14).map(PinRecord::analog_value),
        Some(1023)
    );
}

#[test]
fn test_unknown_analog_channel_leaves_registry_unchanged() {
    let mut manager = discovered_uno_manager();
    let before = manager.registry().pins().to_vec();

    manager.receive(&analog_report(9, 500));

    assert_eq!(manager.registry().pins(), before.as_slice());
    assert_eq!(manager.events(), &vec![PinIoEvent::PinStateUpdated]);
}

#[test]
fn test_multiple_reports_in_one_read() {
    let mut manager = discovered_uno_manager();
    let mut read = Vec::new();
    read.extend_from_slice(&digital_report(0, 0b0000_1100));
    read.extend_from_slice(&analog_report(0, 100));
    read.extend_from_slice(&analog_report(5, 200));
    manager.receive(&read);

    assert_eq!(
        manager.registry().get(2).map(PinRecord::digital_value),
        Some(DigitalValue::High)
    );
    assert_eq!(manager.registry().get(14).map(PinRecord::analog_value), Some(100));
    assert_eq!(manager.registry().get(19).map(PinRecord::analog_value), Some(200));
    assert_eq!(manager.events().len(), 1);
}

#[test]
fn test_trailing_partial_report_is_ignored() {
    let mut manager = discovered_uno_manager();
    let mut read = analog_report(1, 300).to_vec();
    read.extend_from_slice(&[0xE2, 0x10]);
    manager.receive(&read);

    assert_eq!(manager.registry().get(15).map(PinRecord::analog_value), Some(300));
    assert_eq!(manager.registry().get(16).map(PinRecord::analog_value), Some(0));
    assert_eq!(manager.events(), &vec![PinIoEvent::PinStateUpdated]);
}

#[test]
fn test_unrecognized_header_is_skipped() {
    let mut manager = discovered_uno_manager();
    let mut read = vec![0xA0, 0x01, 0x02];
    read.extend_from_slice(&analog_report(2, 42));
    manager.receive(&read);
    assert_eq!(manager.registry().get(16).map(PinRecord::analog_value), Some(42));
}

#[test]
fn test_pin_state_response_analog_value() {
    let mut manager = discovered_uno_manager();
    manager.receive(&[0xF0, 0x6E, 0x0E, 0x02, 0x15, 0x03, 0xF7]);

    let pin = must_some(manager.registry().get(14), "pin 14");
    assert_eq!(pin.mode(), PinMode::Analog);
    assert_eq!(pin.analog_value(), 0x15 | (0x03 << 7));
    assert_eq!(
        manager.writer().frames(),
        &[vec![0xF4, 0x0E, 0x02], vec![0xC0, 0x01]]
    );
    assert!(manager.events().is_empty());
}

#[test]
fn test_pin_state_response_pwm_value() {
    let mut manager = discovered_uno_manager();
    manager.receive(&[0xF0, 0x6E, 0x09, 0x03, 0x7F, 0x01, 0xF7]);

    let pin = must_some(manager.registry().get(9), "pin 9");
    assert_eq!(pin.mode(), PinMode::Pwm);
    assert_eq!(pin.analog_value(), 0xFF);
    assert_eq!(manager.writer().frames(), &[vec![0xF4, 0x09, 0x03]]);
}

#[test]
fn test_pin_state_response_without_high_bits_is_digital() {
    let mut manager = discovered_uno_manager();
    // Byte 5 is the terminator, so there are no high bits.
    manager.receive(&[0xF0, 0x6E, 0x0E, 0x02, 0x01, 0xF7]);

    let pin = must_some(manager.registry().get(14), "pin 14");
    assert_eq!(pin.mode(), PinMode::Analog);
    assert_eq!(pin.digital_value(), DigitalValue::High);
    assert_eq!(pin.analog_value(), 0);
    assert_eq!(
        manager.writer().frames(),
        &[
            vec![0xF4, 0x0E, 0x02],
            vec![0xC0, 0x01],
            vec![0x91, 0x40, 0x00],
        ]
    );
}

#[test]
fn test_pin_state_response_leaving_analog_unsubscribes() {
    let mut manager = discovered_uno_manager();
    manager.receive(&[0xF0, 0x6E, 0x0F, 0x02, 0x00, 0x00, 0xF7]);
    manager.writer_mut().clear();

    manager.receive(&[0xF0, 0x6E, 0x0F, 0x01, 0x00, 0xF7]);

    assert_eq!(
        manager.writer().frames(),
        &[
            vec![0xF4, 0x0F, 0x01],
            vec![0xC1, 0x00],
            vec![0x91, 0x00, 0x00],
        ]
    );
}

#[test]
fn test_pin_state_response_unknown_mode_is_dropped() {
    let mut manager = discovered_uno_manager();
    let before = manager.registry().pins().to_vec();

    manager.receive(&[0xF0, 0x6E, 0x04, 0x09, 0x00, 0xF7]);

    assert_eq!(manager.registry().pins(), before.as_slice());
    assert!(manager.writer().frames().is_empty());
    assert!(manager.events().is_empty());
}

#[test]
fn test_pin_state_response_unknown_pin_is_dropped() {
    let mut manager = discovered_uno_manager();
    manager.receive(&[0xF0, 0x6E, 0x30, 0x01, 0x01, 0xF7]);
    assert!(manager.writer().frames().is_empty());
    assert!(manager.events().is_empty());
}

#[test]
fn test_pin_state_response_bad_digital_value_is_dropped() {
    let mut manager = discovered_uno_manager();
    let before = manager.registry().pins().to_vec();
    manager.receive(&[0xF0, 0x6E, 0x04, 0x01, 0x02, 0xF7]);
    assert_eq!(manager.registry().pins(), before.as_slice());
    assert!(manager.writer().frames().is_empty());
}

#[test]
fn test_short_sysex_is_treated_as_stream() {
    let mut manager = discovered_uno_manager();
    manager.receive(&[0xF0, 0x6E, 0x02, 0x01]);
    assert_eq!(manager.events(), &vec![PinIoEvent::PinStateUpdated]);
    assert!(manager.writer().frames().is_empty());
}

#[test]
fn test_reports_during_discovery_are_buffered_not_applied() {
    let mut manager = default_layout_manager();
    manager.query_capabilities();
    manager.receive(&digital_report(0, 0xFF));
    assert!(manager.events().is_empty());
    assert!(manager.is_querying_capabilities());
}
