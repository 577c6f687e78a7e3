//! Analog mapping response parsing.
//!
//! After the sysex header each byte belongs to one digital pin, in order.
//! `0x7F` means the pin has no analog channel; any other value is the
//! zero-based analog channel id.

use tracing::debug;

use crate::constants::{MAX_DIGITAL_ID, PIN_DELIMITER, sysex_payload};

/// Digital id to analog channel assignments, in ascending digital id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalogMapping {
    entries: Vec<(u8, u8)>,
}

impl AnalogMapping {
    pub fn entries(&self) -> &[(u8, u8)] {
        &self.entries
    }

    pub fn channel_for(&self, digital_id: u8) -> Option<u8> {
        self.entries
            .iter()
            .find(|(id, _)| *id == digital_id)
            .map(|(_, channel)| *channel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a complete analog mapping response (header, payload and terminator).
pub fn parse_analog_mapping_response(frame: &[u8]) -> AnalogMapping {
    let payload = sysex_payload(frame);
    let mut entries = Vec::new();

    for (index, &channel) in payload.iter().enumerate() {
        let Ok(digital_id) = u8::try_from(index) else {
            break;
        };
        if digital_id > MAX_DIGITAL_ID {
            break;
        }
        if channel != PIN_DELIMITER {
            entries.push((digital_id, channel));
        }
    }

    debug!(channels = entries.len(), "parsed analog mapping response");
    AnalogMapping { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{END_SYSEX, START_SYSEX, sysex};

    #[test]
    fn test_position_is_digital_id() {
        let frame = [
            START_SYSEX,
            sysex::ANALOG_MAPPING_QUERY,
            0x7F,
            0x7F,
            0x00,
            0x7F,
            0x01,
            END_SYSEX,
        ];
        let mapping = parse_analog_mapping_response(&frame);
        assert_eq!(mapping.entries(), &[(2, 0), (4, 1)]);
        assert_eq!(mapping.channel_for(4), Some(1));
        assert_eq!(mapping.channel_for(3), None);
    }

    #[test]
    fn test_no_analog_pins() {
        let frame = [START_SYSEX, sysex::ANALOG_MAPPING_QUERY, 0x7F, 0x7F, END_SYSEX];
        assert!(parse_analog_mapping_response(&frame).is_empty());
    }

    #[test]
    fn test_short_frames() {
        assert!(parse_analog_mapping_response(&[]).is_empty());
        assert!(parse_analog_mapping_response(&[START_SYSEX]).is_empty());
    }
}
