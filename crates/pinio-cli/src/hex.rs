//! Hex capture decoding.
//!
//! A frame is written as hex bytes separated by whitespace, commas or colons,
//! each optionally prefixed with `0x`: `F0 6B F7` or `0xF0,0x6B,0xF7`. A run
//! of digits without separators is split into byte pairs, so `F06BF7` is the
//! same frame.

use std::fs;
use std::path::Path;

use crate::error::CliError;

pub fn parse_frame(text: &str) -> Result<Vec<u8>, CliError> {
    let mut bytes = Vec::new();
    let tokens = text
        .split(|c: char| c.is_whitespace() || c == ',' || c == ':')
        .filter(|token| !token.is_empty());

    for token in tokens {
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        if digits.is_empty() {
            return Err(CliError::InvalidHex(token.to_string()));
        }
        // A lone digit is a whole byte: `90:8:0`.
        let decoded = if digits.len() == 1 {
            hex::decode(format!("0{digits}"))
        } else {
            hex::decode(digits)
        };
        bytes.extend(decoded.map_err(|err| match err {
            hex::FromHexError::OddLength => CliError::OddHexLength(token.to_string()),
            hex::FromHexError::InvalidHexCharacter { .. }
            | hex::FromHexError::InvalidStringLength => CliError::InvalidHex(token.to_string()),
        })?);
    }
    Ok(bytes)
}

/// Collect frames from positional arguments and, when given, a capture file
/// with one frame per line. Blank lines and `#` comments are skipped.
pub fn read_frames(args: &[String], file: Option<&Path>) -> Result<Vec<Vec<u8>>, CliError> {
    let mut frames = args
        .iter()
        .map(String::as_str)
        .map(parse_frame)
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(path) = file {
        let text = fs::read_to_string(path)?;
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            frames.push(parse_frame(line)?);
        }
    }

    if frames.is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(frames)
}

/// Render a frame as space-separated upper-case hex.
pub fn format_frame(frame: &[u8]) -> String {
    frame
        .iter()
        .map(|byte| hex::encode_upper([*byte]))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_parses_separated_bytes() -> TestResult {
        assert_eq!(parse_frame("F0 6B F7")?, [0xF0, 0x6B, 0xF7]);
        assert_eq!(parse_frame("0xf0,0x6b,0xf7")?, [0xF0, 0x6B, 0xF7]);
        assert_eq!(parse_frame("90:8:0")?, [0x90, 0x08, 0x00]);
        Ok(())
    }

    #[test]
    fn test_parses_packed_digits() -> TestResult {
        assert_eq!(parse_frame("F06BF7")?, [0xF0, 0x6B, 0xF7]);
        assert_eq!(parse_frame("e3 7f07")?, [0xE3, 0x7F, 0x07]);
        Ok(())
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(parse_frame("F0 GG"), Err(CliError::InvalidHex(t)) if t == "GG"));
        assert!(matches!(parse_frame("+F"), Err(CliError::InvalidHex(_))));
        assert!(matches!(parse_frame("0x"), Err(CliError::InvalidHex(_))));
        assert!(matches!(parse_frame("F06"), Err(CliError::OddHexLength(_))));
        assert!(matches!(parse_frame("0xF0 0x6"), Ok(bytes) if bytes == [0xF0, 0x06]));
        assert!(matches!(parse_frame("F0 6Z"), Err(CliError::InvalidHex(t)) if t == "6Z"));
    }

    #[test]
    fn test_empty_frame_list_is_an_error() {
        assert!(matches!(read_frames(&[], None), Err(CliError::NoInput)));
    }

    #[test]
    fn test_formats_frames() {
        assert_eq!(format_frame(&[0xF0, 0x6B, 0xF7]), "F0 6B F7");
        assert_eq!(format_frame(&[]), "");
    }
}
