//! Captured board responses and ready-made managers.

use pinio_core::{PinIoConfig, PinIoEvent, PinIoManager, PinIoResult};

use crate::mock::{RecordingTimer, RecordingWriter};

/// Manager wired to recording doubles.
pub type TestManager = PinIoManager<RecordingWriter, RecordingTimer, Vec<PinIoEvent>>;

/// Capability response from an Uno running BLE Firmata. Pins 0 and 1 carry
/// the serial link and are reported unavailable.
pub const UNO_CAPABILITY_RESPONSE: &[u8] = &[
    0xF0, 0x6B, //
    0x7F, // pin 0
    0x7F, // pin 1
    0x00, 0x01, 0x01, 0x01, 0x04, 0x0E, 0x7F, // pin 2
    0x00, 0x01, 0x01, 0x01, 0x03, 0x08, 0x04, 0x0E, 0x7F, // pin 3
    0x00, 0x01, 0x01, 0x01, 0x04, 0x0E, 0x7F, // pin 4
    0x00, 0x01, 0x01, 0x01, 0x03, 0x08, 0x04, 0x0E, 0x7F, // pin 5
    0x00, 0x01, 0x01, 0x01, 0x03, 0x08, 0x04, 0x0E, 0x7F, // pin 6
    0x00, 0x01, 0x01, 0x01, 0x04, 0x0E, 0x7F, // pin 7
    0x00, 0x01, 0x01, 0x01, 0x04, 0x0E, 0x7F, // pin 8
    0x00, 0x01, 0x01, 0x01, 0x03, 0x08, 0x04, 0x0E, 0x7F, // pin 9
    0x00, 0x01, 0x01, 0x01, 0x03, 0x08, 0x04, 0x0E, 0x7F, // pin 10
    0x00, 0x01, 0x01, 0x01, 0x03, 0x08, 0x04, 0x0E, 0x7F, // pin 11
    0x00, 0x01, 0x01, 0x01, 0x04, 0x0E, 0x7F, // pin 12
    0x00, 0x01, 0x01, 0x01, 0x04, 0x0E, 0x7F, // pin 13
    0x00, 0x01, 0x01, 0x01, 0x02, 0x0A, 0x04, 0x0E, 0x7F, // pin 14
    0x00, 0x01, 0x01, 0x01, 0x02, 0x0A, 0x04, 0x0E, 0x7F, // pin 15
    0x00, 0x01, 0x01, 0x01, 0x02, 0x0A, 0x04, 0x0E, 0x7F, // pin 16
    0x00, 0x01, 0x01, 0x01, 0x02, 0x0A, 0x04, 0x0E, 0x7F, // pin 17
    0x00, 0x01, 0x01, 0x01, 0x02, 0x0A, 0x04, 0x0E, 0x06, 0x01, 0x7F, // pin 18
    0x00, 0x01, 0x01, 0x01, 0x02, 0x0A, 0x04, 0x0E, 0x06, 0x01, 0x7F, // pin 19
    0xF7,
];

/// Analog mapping response from the same board: A0..A5 on pins 14..19.
pub const UNO_ANALOG_MAPPING_RESPONSE: &[u8] = &[
    0xF0, 0x69, //
    0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, // pins 0-9
    0x7F, 0x7F, 0x7F, 0x7F, // pins 10-13
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, // pins 14-19
    0xF7,
];

pub const UNO_PIN_COUNT: usize = 18;
pub const UNO_PWM_PINS: [u8; 6] = [3, 5, 6, 9, 10, 11];

pub fn test_manager() -> TestManager {
    PinIoManager::new(RecordingWriter::new(), RecordingTimer::new(), Vec::new())
}

/// Manager with a custom configuration.
///
/// # Errors
///
/// Returns the validation error of an invalid configuration.
pub fn test_manager_with_config(config: PinIoConfig) -> PinIoResult<TestManager> {
    PinIoManager::with_config(config, RecordingWriter::new(), RecordingTimer::new(), Vec::new())
}

/// Manager that completed discovery against the Uno captures. Recorded
/// frames and events are cleared.
pub fn discovered_uno_manager() -> TestManager {
    let mut manager = test_manager();
    manager.query_capabilities();
    manager.receive(UNO_CAPABILITY_RESPONSE);
    manager.receive(UNO_ANALOG_MAPPING_RESPONSE);
    manager.writer_mut().clear();
    manager.events_mut().clear();
    manager
}

/// Manager that fell back to the default layout. Recorded frames and events
/// are cleared.
pub fn default_layout_manager() -> TestManager {
    let mut manager = test_manager();
    manager.end_query(true);
    manager.writer_mut().clear();
    manager.events_mut().clear();
    manager
}

/// Streamed digital port report.
pub fn digital_report(port: u8, mask: u8) -> [u8; 3] {
    [0x90 | (port & 0x0F), mask & 0x7F, mask >> 7]
}

/// Streamed analog channel report.
pub fn analog_report(channel: u8, value: u16) -> [u8; 3] {
    let low = (value & 0x7F) as u8;
    let high = ((value >> 7) & 0x7F) as u8;
    [0xE0 | (channel & 0x0F), low, high]
}
