//! Pin state response parsing.
//!
//! ```text
//! 0  START_SYSEX (0xF0)
//! 1  pin state response (0x6E)
//! 2  pin (0..127)
//! 3  pin mode
//! 4  pin state, bits 0-6
//! 5  (optional) pin state, bits 7-13
//! .. END_SYSEX (0xF7)
//! ```

use crate::constants::{END_SYSEX, START_SYSEX, join_7bit, sysex};
use crate::error::{FrameError, FrameResult};
use crate::types::PinMode;

pub const PIN_STATE_MIN_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinStateResponse {
    pub digital_id: u8,
    pub mode: PinMode,
    pub state_low: u8,
    pub state_high: Option<u8>,
}

impl PinStateResponse {
    /// The 14-bit pin state, when the high bits were present.
    pub fn analog_value(&self) -> Option<u16> {
        self.state_high.map(|high| join_7bit(self.state_low, high))
    }
}

/// Whether the buffer starts like a pin state response.
pub fn is_pin_state_response(data: &[u8]) -> bool {
    data.len() >= PIN_STATE_MIN_LEN
        && data.first() == Some(&START_SYSEX)
        && data.get(1) == Some(&sysex::PIN_STATE_RESPONSE)
}

pub fn parse_pin_state_response(data: &[u8]) -> FrameResult<PinStateResponse> {
    let [start, command, digital_id, mode_code, state_low, rest @ ..] = data else {
        return Err(FrameError::TooShort {
            expected: PIN_STATE_MIN_LEN,
            actual: data.len(),
        });
    };
    if *start != START_SYSEX {
        return Err(FrameError::UnexpectedCommand(*start));
    }
    if *command != sysex::PIN_STATE_RESPONSE {
        return Err(FrameError::UnexpectedCommand(*command));
    }

    let mode = PinMode::from_wire(*mode_code).ok_or(FrameError::UnknownMode(*mode_code))?;
    // The terminator is never a data byte.
    let state_high = rest.first().copied().filter(|&b| b != END_SYSEX);

    Ok(PinStateResponse {
        digital_id: *digital_id,
        mode,
        state_low: *state_low,
        state_high,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digital_state() -> Result<(), FrameError> {
        let response = parse_pin_state_response(&[0xF0, 0x6E, 0x05, 0x01, 0x01, 0xF7])?;
        assert_eq!(response.digital_id, 5);
        assert_eq!(response.mode, PinMode::Output);
        assert_eq!(response.state_low, 1);
        assert_eq!(response.state_high, None);
        assert_eq!(response.analog_value(), None);
        Ok(())
    }

    #[test]
    fn test_analog_state_with_high_bits() -> Result<(), FrameError> {
        let response = parse_pin_state_response(&[0xF0, 0x6E, 0x0E, 0x02, 0x10, 0x03, 0xF7])?;
        assert_eq!(response.mode, PinMode::Analog);
        assert_eq!(response.analog_value(), Some(0x10 | (0x03 << 7)));
        Ok(())
    }

    #[test]
    fn test_unterminated_six_byte_frame() -> Result<(), FrameError> {
        let response = parse_pin_state_response(&[0xF0, 0x6E, 0x0E, 0x02, 0x7F, 0x7F])?;
        assert_eq!(response.analog_value(), Some(0x3FFF));
        Ok(())
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = parse_pin_state_response(&[0xF0, 0x6E, 0x02, 0x09, 0x00, 0xF7]);
        assert_eq!(result, Err(FrameError::UnknownMode(0x09)));
    }

    #[test]
    fn test_too_short() {
        let result = parse_pin_state_response(&[0xF0, 0x6E, 0x02, 0x01]);
        assert!(matches!(result, Err(FrameError::TooShort { actual: 4, .. })));
    }

    #[test]
    fn test_recognition() {
        assert!(is_pin_state_response(&[0xF0, 0x6E, 0x02, 0x01, 0x00]));
        assert!(!is_pin_state_response(&[0xF0, 0x6E, 0x02, 0x01]));
        assert!(!is_pin_state_response(&[0xF0, 0x6B, 0x02, 0x01, 0x00]));
        assert!(!is_pin_state_response(&[0x90, 0x6E, 0x02, 0x01, 0x00]));
    }
}
