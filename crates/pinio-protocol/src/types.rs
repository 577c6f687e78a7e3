//! Pin mode and digital value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::mode_code;

/// Operating mode of a pin, as exchanged on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PinMode {
    Unknown,
    #[default]
    Input,
    Output,
    Analog,
    #[serde(rename = "PWM")]
    Pwm,
    Servo,
}

impl PinMode {
    pub const ALL: [PinMode; 6] = [
        PinMode::Unknown,
        PinMode::Input,
        PinMode::Output,
        PinMode::Analog,
        PinMode::Pwm,
        PinMode::Servo,
    ];

    pub fn from_wire(code: u8) -> Option<Self> {
        match code {
            mode_code::INPUT => Some(Self::Input),
            mode_code::OUTPUT => Some(Self::Output),
            mode_code::ANALOG => Some(Self::Analog),
            mode_code::PWM => Some(Self::Pwm),
            mode_code::SERVO => Some(Self::Servo),
            mode_code::UNKNOWN => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            Self::Unknown => mode_code::UNKNOWN,
            Self::Input => mode_code::INPUT,
            Self::Output => mode_code::OUTPUT,
            Self::Analog => mode_code::ANALOG,
            Self::Pwm => mode_code::PWM,
            Self::Servo => mode_code::SERVO,
        }
    }

    /// Modes whose pin state is a multi-byte value rather than a single bit.
    pub fn carries_analog_value(self) -> bool {
        matches!(self, Self::Analog | Self::Pwm | Self::Servo)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Input => "Input",
            Self::Output => "Output",
            Self::Analog => "Analog",
            Self::Pwm => "PWM",
            Self::Servo => "Servo",
        }
    }
}

impl fmt::Display for PinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DigitalValue {
    #[default]
    Low,
    High,
}

impl DigitalValue {
    /// Decode a wire value. Only 0 and 1 are meaningful.
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Low),
            1 => Some(Self::High),
            _ => None,
        }
    }

    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::High } else { Self::Low }
    }

    pub fn to_bit(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }

    pub fn is_high(self) -> bool {
        self == Self::High
    }
}

impl fmt::Display for DigitalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("Low"),
            Self::High => f.write_str("High"),
        }
    }
}
