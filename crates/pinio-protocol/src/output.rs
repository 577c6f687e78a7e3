//! Outgoing command encoding.
//!
//! Every builder returns a fixed-size array so callers can send it without
//! allocating. Nibble-addressed commands reject channels above 15 instead of
//! spilling into the next command byte.

use crate::constants::{
    END_SYSEX, MAX_ANALOG_VALUE, MAX_NIBBLE_CHANNEL, START_SYSEX, SYSTEM_RESET, command,
    split_7bit, sysex,
};
use crate::error::{FrameError, FrameResult};
use crate::types::PinMode;

pub const SYSTEM_RESET_LEN: usize = 1;
pub const QUERY_LEN: usize = 3;
pub const SET_PIN_MODE_LEN: usize = 3;
pub const REPORT_LEN: usize = 2;
pub const WRITE_LEN: usize = 3;

fn check_channel(channel: u8) -> FrameResult<u8> {
    if channel > MAX_NIBBLE_CHANNEL {
        return Err(FrameError::ChannelOutOfRange {
            channel,
            max: MAX_NIBBLE_CHANNEL,
        });
    }
    Ok(channel)
}

pub fn build_system_reset() -> [u8; SYSTEM_RESET_LEN] {
    [SYSTEM_RESET]
}

pub fn build_capability_query() -> [u8; QUERY_LEN] {
    [START_SYSEX, sysex::CAPABILITY_QUERY, END_SYSEX]
}

pub fn build_analog_mapping_query() -> [u8; QUERY_LEN] {
    [START_SYSEX, sysex::ANALOG_MAPPING_QUERY, END_SYSEX]
}

pub fn build_set_pin_mode(digital_id: u8, mode: PinMode) -> [u8; SET_PIN_MODE_LEN] {
    [command::SET_PIN_MODE, digital_id, mode.to_wire()]
}

/// Enable or disable streamed reports for a digital port.
pub fn build_report_digital(port: u8, enabled: bool) -> FrameResult<[u8; REPORT_LEN]> {
    let port = check_channel(port)?;
    Ok([command::REPORT_DIGITAL + port, u8::from(enabled)])
}

/// Enable or disable streamed reports for an analog channel.
pub fn build_report_analog(channel: u8, enabled: bool) -> FrameResult<[u8; REPORT_LEN]> {
    let channel = check_channel(channel)?;
    Ok([command::REPORT_ANALOG + channel, u8::from(enabled)])
}

/// Write the full output mask of a digital port.
pub fn build_digital_port_write(port: u8, mask: u8) -> FrameResult<[u8; WRITE_LEN]> {
    let port = check_channel(port)?;
    Ok([command::DIGITAL_MESSAGE + port, mask & 0x7F, mask >> 7])
}

/// Write a 14-bit analog (PWM) value to a pin.
pub fn build_analog_write(digital_id: u8, value: u16) -> FrameResult<[u8; WRITE_LEN]> {
    let digital_id = check_channel(digital_id)?;
    if value > MAX_ANALOG_VALUE {
        return Err(FrameError::ValueOutOfRange {
            value,
            max: MAX_ANALOG_VALUE,
        });
    }
    let (low, high) = split_7bit(value);
    Ok([command::ANALOG_MESSAGE + digital_id, low, high])
}
