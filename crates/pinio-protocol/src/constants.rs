//! Wire constants for the sysex pin I/O protocol.
//!
//! All multi-byte values travel as 7-bit data bytes; any byte with the high
//! bit set is a command or framing byte.

/// Sysex frame start.
pub const START_SYSEX: u8 = 0xF0;
/// Sysex frame end.
pub const END_SYSEX: u8 = 0xF7;
/// Single-byte system reset.
pub const SYSTEM_RESET: u8 = 0xFF;

/// Number of header bytes (`START_SYSEX` + command) in a sysex frame.
pub const SYSEX_HEADER_LEN: usize = 2;

/// Sysex sub-commands.
pub mod sysex {
    pub const ANALOG_MAPPING_QUERY: u8 = 0x69;
    pub const CAPABILITY_QUERY: u8 = 0x6B;
    pub const PIN_STATE_RESPONSE: u8 = 0x6E;
}

/// Channel-addressed commands. The low nibble carries the port, pin or
/// analog channel.
pub mod command {
    pub const DIGITAL_MESSAGE: u8 = 0x90;
    pub const DIGITAL_MESSAGE_END: u8 = 0x9F;
    pub const REPORT_ANALOG: u8 = 0xC0;
    pub const REPORT_DIGITAL: u8 = 0xD0;
    pub const ANALOG_MESSAGE: u8 = 0xE0;
    pub const ANALOG_MESSAGE_END: u8 = 0xEF;
    pub const SET_PIN_MODE: u8 = 0xF4;
}

/// Mode codes as they appear in capability responses and pin state frames.
pub mod mode_code {
    pub const INPUT: u8 = 0x00;
    pub const OUTPUT: u8 = 0x01;
    pub const ANALOG: u8 = 0x02;
    pub const PWM: u8 = 0x03;
    pub const SERVO: u8 = 0x04;
    pub const SHIFT: u8 = 0x05;
    pub const I2C: u8 = 0x06;
    pub const ONEWIRE: u8 = 0x07;
    pub const STEPPER: u8 = 0x08;
    pub const ENCODER: u8 = 0x09;
    pub const SERIAL: u8 = 0x0A;
    pub const PULLUP: u8 = 0x0B;
    /// Wire encoding of an unknown / unset mode.
    pub const UNKNOWN: u8 = 0xFF;
}

/// Separates per-pin segments in a capability response; marks "no analog
/// channel" in an analog mapping response.
pub const PIN_DELIMITER: u8 = 0x7F;

/// Number of pins carried by one digital port.
pub const PINS_PER_PORT: u8 = 8;

/// Largest value a nibble-addressed command can carry in its low nibble.
pub const MAX_NIBBLE_CHANNEL: u8 = 0x0F;

/// Largest value representable by two 7-bit data bytes.
pub const MAX_ANALOG_VALUE: u16 = 0x3FFF;

/// Highest digital id a 7-bit pin byte can address.
pub const MAX_DIGITAL_ID: u8 = 0x7F;

/// Strip the two sysex header bytes and the trailing terminator.
///
/// Buffers too short to carry any payload yield an empty slice.
pub fn sysex_payload(frame: &[u8]) -> &[u8] {
    let end = frame.len().saturating_sub(1);
    frame.get(SYSEX_HEADER_LEN..end).unwrap_or(&[])
}

/// Combine two 7-bit data bytes into a 14-bit value.
#[inline]
pub fn join_7bit(low: u8, high: u8) -> u16 {
    u16::from(low & 0x7F) | (u16::from(high & 0x7F) << 7)
}

/// Split a 14-bit value into (low, high) 7-bit data bytes.
#[inline]
pub fn split_7bit(value: u16) -> (u8, u8) {
    ((value & 0x7F) as u8, ((value >> 7) & 0x7F) as u8)
}
