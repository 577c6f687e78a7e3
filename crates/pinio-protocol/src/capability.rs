//! Capability response parsing.
//!
//! Layout after the sysex header: one segment per pin, each terminated by
//! `0x7F`. A segment is a sequence of `(mode code, resolution)` pairs; an
//! empty segment marks a pin that is not available.
//!
//! ```text
//! F0 6B  00 01 01 01 7F  7F  00 01 01 01 02 0A 7F  F7
//!        |   pin 0    |  1  |       pin 2       |
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{MAX_DIGITAL_ID, PIN_DELIMITER, mode_code, sysex_payload};

/// Capabilities advertised for one available pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PinCapabilities {
    pub digital_id: u8,
    pub is_digital: bool,
    pub is_analog: bool,
    pub is_pwm: bool,
    pub supports_servo: bool,
    pub supports_i2c: bool,
}

#[derive(Debug, Default)]
struct SegmentFlags {
    input: bool,
    output: bool,
    analog: bool,
    pwm: bool,
    servo: bool,
    i2c: bool,
}

/// Mode codes read as `(code, resolution)` pairs. Any other byte is
/// skipped on its own.
fn is_paired_mode_code(code: u8) -> bool {
    matches!(
        code,
        mode_code::INPUT
            | mode_code::OUTPUT
            | mode_code::ANALOG
            | mode_code::PWM
            | mode_code::SERVO
            | mode_code::I2C
    )
}

fn scan_segment(segment: &[u8]) -> SegmentFlags {
    let mut flags = SegmentFlags::default();
    let mut i = 0;
    while let Some(&code) = segment.get(i) {
        match code {
            mode_code::INPUT => flags.input = true,
            mode_code::OUTPUT => flags.output = true,
            mode_code::ANALOG => flags.analog = true,
            mode_code::PWM => flags.pwm = true,
            mode_code::SERVO => flags.servo = true,
            mode_code::I2C => flags.i2c = true,
            _ => {}
        }
        i += if is_paired_mode_code(code) { 2 } else { 1 };
    }
    flags
}

/// Parse a complete capability response (header, payload and terminator).
///
/// One record is produced per non-empty segment. Digital ids follow the
/// segment index, so unavailable pins leave gaps in the id sequence. Bytes
/// after the last delimiter do not form a segment and are ignored.
pub fn parse_capability_response(frame: &[u8]) -> Vec<PinCapabilities> {
    let payload = sysex_payload(frame);
    let mut pins = Vec::new();

    // `split` also yields the remainder after the last delimiter.
    let segment_count = payload.iter().filter(|&&b| b == PIN_DELIMITER).count();

    for (index, segment) in payload
        .split(|&b| b == PIN_DELIMITER)
        .take(segment_count)
        .enumerate()
    {
        let Ok(digital_id) = u8::try_from(index) else {
            break;
        };
        if digital_id > MAX_DIGITAL_ID {
            debug!(digital_id, "capability response exceeds addressable pins");
            break;
        }
        if segment.is_empty() {
            continue;
        }

        let flags = scan_segment(segment);
        pins.push(PinCapabilities {
            digital_id,
            is_digital: flags.input && flags.output,
            is_analog: flags.analog,
            is_pwm: flags.pwm,
            supports_servo: flags.servo,
            supports_i2c: flags.i2c,
        });
    }

    debug!(
        pins = pins.len(),
        payload_len = payload.len(),
        "parsed capability response"
    );
    pins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{END_SYSEX, START_SYSEX, sysex};

    fn frame(payload: &[u8]) -> Vec<u8> {
        let mut out = vec![START_SYSEX, sysex::CAPABILITY_QUERY];
        out.extend_from_slice(payload);
        out.push(END_SYSEX);
        out
    }

    #[test]
    fn test_single_digital_pin() {
        let pins = parse_capability_response(&frame(&[0x00, 0x01, 0x01, 0x01, 0x7F]));
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].digital_id, 0);
        assert!(pins[0].is_digital);
        assert!(!pins[0].is_analog);
        assert!(!pins[0].is_pwm);
    }

    #[test]
    fn test_input_only_is_not_digital() {
        let pins = parse_capability_response(&frame(&[0x00, 0x01, 0x7F]));
        assert_eq!(pins.len(), 1);
        assert!(!pins[0].is_digital);
    }

    #[test]
    fn test_empty_segments_leave_id_gaps() {
        let payload = [
            0x7F, // pin 0 unavailable
            0x7F, // pin 1 unavailable
            0x00, 0x01, 0x01, 0x01, 0x03, 0x08, 0x7F, // pin 2
            0x7F, // pin 3 unavailable
            0x00, 0x01, 0x01, 0x01, 0x02, 0x0A, 0x7F, // pin 4
        ];
        let pins = parse_capability_response(&frame(&payload));
        assert_eq!(pins.len(), 2);
        assert_eq!(pins[0].digital_id, 2);
        assert!(pins[0].is_pwm);
        assert_eq!(pins[1].digital_id, 4);
        assert!(pins[1].is_analog);
    }

    #[test]
    fn test_servo_and_i2c_are_recognised() {
        let pins = parse_capability_response(&frame(&[0x04, 0x0E, 0x06, 0x01, 0x7F]));
        assert_eq!(pins.len(), 1);
        assert!(pins[0].supports_servo);
        assert!(pins[0].supports_i2c);
        assert!(!pins[0].is_digital);
    }

    #[test]
    fn test_resolution_bytes_are_not_mode_codes() {
        // Resolution 0x02 after OUTPUT must not mark the pin analog.
        let pins = parse_capability_response(&frame(&[0x01, 0x02, 0x00, 0x03, 0x7F]));
        assert_eq!(pins.len(), 1);
        assert!(pins[0].is_digital);
        assert!(!pins[0].is_analog);
        assert!(!pins[0].is_pwm);
    }

    #[test]
    fn test_unrecognised_byte_steps_one() {
        // 0x55 is not a mode code; the following INPUT pair must still be read.
        let pins = parse_capability_response(&frame(&[0x55, 0x00, 0x01, 0x01, 0x01, 0x7F]));
        assert_eq!(pins.len(), 1);
        assert!(pins[0].is_digital);
    }

    #[test]
    fn test_unpaired_mode_codes_step_one_byte() {
        // SHIFT carries no resolution byte here; `02 0A` is an ANALOG pair.
        let pins = parse_capability_response(&frame(&[
            0x00, 0x01, 0x01, 0x01, 0x05, 0x02, 0x0A, 0x7F,
        ]));
        assert_eq!(pins.len(), 1);
        assert!(pins[0].is_digital);
        assert!(pins[0].is_analog);

        let pins = parse_capability_response(&frame(&[
            0x00, 0x01, 0x0B, 0x03, 0x08, 0x04, 0x0E, 0x7F,
        ]));
        assert_eq!(pins.len(), 1);
        assert!(pins[0].is_pwm);
        assert!(pins[0].supports_servo);
        assert!(!pins[0].is_digital);
    }

    #[test]
    fn test_trailing_bytes_without_delimiter_are_ignored() {
        let pins = parse_capability_response(&frame(&[0x00, 0x01, 0x01, 0x01, 0x7F, 0x00, 0x01]));
        assert_eq!(pins.len(), 1);
    }

    #[test]
    fn test_empty_and_short_frames() {
        assert!(parse_capability_response(&[]).is_empty());
        assert!(parse_capability_response(&[START_SYSEX, 0x6B, END_SYSEX]).is_empty());
    }
}
