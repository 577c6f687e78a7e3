//! Frame-level error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("Frame too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("Unexpected frame header: {0:#04x}")]
    UnexpectedCommand(u8),

    #[error("Unknown pin mode code: {0:#04x}")]
    UnknownMode(u8),

    #[error("Value {value} exceeds the {max} limit of a 14-bit field")]
    ValueOutOfRange { value: u16, max: u16 },

    #[error("Channel {channel} cannot be addressed by a nibble command (max {max})")]
    ChannelOutOfRange { channel: u8, max: u8 },
}

pub type FrameResult<T> = Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FrameError::TooShort {
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Frame too short: expected at least 5 bytes, got 3"
        );
        assert_eq!(
            FrameError::UnknownMode(0x42).to_string(),
            "Unknown pin mode code: 0x42"
        );
    }
}
