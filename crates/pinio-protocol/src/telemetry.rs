//! Streamed telemetry decoding.
//!
//! The board streams fixed three-byte reports:
//!
//! - `0x90 + port, low7, high7`: digital port report, one bit per pin
//! - `0xE0 + channel, low7, high7`: analog channel report, 14-bit value
//!
//! A buffer may hold several reports back to back. A trailing partial report
//! is not decoded.

use crate::constants::{PINS_PER_PORT, command, join_7bit};
use crate::types::DigitalValue;

pub const STREAM_FRAME_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFrame {
    DigitalPort { port: u8, word: u16 },
    Analog { channel: u8, value: u16 },
    /// A complete three-byte frame whose header is not a report.
    Unrecognized { header: u8 },
}

impl StreamFrame {
    pub fn decode(frame: [u8; STREAM_FRAME_LEN]) -> Self {
        let [header, low, high] = frame;
        match header {
            command::DIGITAL_MESSAGE..=command::DIGITAL_MESSAGE_END => Self::DigitalPort {
                port: header - command::DIGITAL_MESSAGE,
                word: join_7bit(low, high),
            },
            command::ANALOG_MESSAGE..=command::ANALOG_MESSAGE_END => Self::Analog {
                channel: header - command::ANALOG_MESSAGE,
                value: join_7bit(low, high),
            },
            _ => Self::Unrecognized { header },
        }
    }

    /// Per-pin values of a digital port report: `(digital_id, value)` for the
    /// eight pins of the port. Empty for other frame kinds.
    pub fn pin_values(&self) -> impl Iterator<Item = (u8, DigitalValue)> + use<> {
        let (port, word, count) = match *self {
            Self::DigitalPort { port, word } => (port, word, PINS_PER_PORT),
            _ => (0, 0, 0),
        };
        (0..count).map(move |bit| {
            let digital_id = port * PINS_PER_PORT + bit;
            (digital_id, DigitalValue::from_bit((word >> bit) & 1 == 1))
        })
    }
}

/// Decoded content of one inbound telemetry buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub frames: Vec<StreamFrame>,
    /// Bytes left over after the last complete frame.
    pub trailing_bytes: usize,
}

impl StreamReport {
    pub fn is_truncated(&self) -> bool {
        self.trailing_bytes > 0
    }
}

pub fn decode_stream(data: &[u8]) -> StreamReport {
    let chunks = data.chunks_exact(STREAM_FRAME_LEN);
    let trailing_bytes = chunks.remainder().len();
    let frames = chunks
        .filter_map(|chunk| <[u8; STREAM_FRAME_LEN]>::try_from(chunk).ok())
        .map(StreamFrame::decode)
        .collect();

    StreamReport {
        frames,
        trailing_bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digital_port_report() {
        let frame = StreamFrame::decode([0x91, 0b0000_0101, 0x01]);
        assert_eq!(
            frame,
            StreamFrame::DigitalPort {
                port: 1,
                word: 0b1000_0101
            }
        );
        let values: Vec<_> = frame.pin_values().collect();
        assert_eq!(values.len(), 8);
        assert_eq!(values[0], (8, DigitalValue::High));
        assert_eq!(values[1], (9, DigitalValue::Low));
        assert_eq!(values[2], (10, DigitalValue::High));
        assert_eq!(values[7], (15, DigitalValue::High));
    }

    #[test]
    fn test_analog_report() {
        let frame = StreamFrame::decode([0xE3, 0x7F, 0x07]);
        assert_eq!(
            frame,
            StreamFrame::Analog {
                channel: 3,
                value: 0x3FF
            }
        );
        assert_eq!(frame.pin_values().count(), 0);
    }

    #[test]
    fn test_unrecognized_header() {
        assert_eq!(
            StreamFrame::decode([0xA0, 0x00, 0x00]),
            StreamFrame::Unrecognized { header: 0xA0 }
        );
    }

    #[test]
    fn test_stream_with_trailing_partial() {
        let report = decode_stream(&[0x90, 0x01, 0x00, 0xE0, 0x10, 0x01, 0xE1, 0x05]);
        assert_eq!(report.frames.len(), 2);
        assert_eq!(report.trailing_bytes, 2);
        assert!(report.is_truncated());
    }

    #[test]
    fn test_empty_stream() {
        let report = decode_stream(&[]);
        assert!(report.frames.is_empty());
        assert!(!report.is_truncated());
    }
}
