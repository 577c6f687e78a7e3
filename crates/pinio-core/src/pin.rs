//! Per-pin state record.

use pinio_protocol::{DigitalValue, PinCapabilities, PinMode};
use serde::Serialize;

/// One physical pin known to the manager.
///
/// Capability flags are fixed at creation. Mode and values change only
/// through the manager, so the analog reporting subscription always follows
/// the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinRecord {
    digital_id: u8,
    analog_id: Option<u8>,
    is_digital: bool,
    is_analog: bool,
    is_pwm: bool,
    mode: PinMode,
    digital_value: DigitalValue,
    analog_value: u16,
}

impl PinRecord {
    pub fn new(digital_id: u8, is_digital: bool, is_analog: bool, is_pwm: bool) -> Self {
        Self {
            digital_id,
            analog_id: None,
            is_digital,
            is_analog,
            is_pwm,
            mode: PinMode::default(),
            digital_value: DigitalValue::default(),
            analog_value: 0,
        }
    }

    #[must_use]
    pub fn with_analog_id(mut self, analog_id: u8) -> Self {
        self.analog_id = Some(analog_id);
        self
    }

    pub fn digital_id(&self) -> u8 {
        self.digital_id
    }

    pub fn analog_id(&self) -> Option<u8> {
        self.analog_id
    }

    pub fn is_digital(&self) -> bool {
        self.is_digital
    }

    pub fn is_analog(&self) -> bool {
        self.is_analog
    }

    pub fn is_pwm(&self) -> bool {
        self.is_pwm
    }

    pub fn mode(&self) -> PinMode {
        self.mode
    }

    pub fn digital_value(&self) -> DigitalValue {
        self.digital_value
    }

    pub fn analog_value(&self) -> u16 {
        self.analog_value
    }

    /// Whether the pin's capability flags allow `mode`. Servo support is not
    /// tracked per pin, so only input, output, analog and PWM can match.
    pub fn supports(&self, mode: PinMode) -> bool {
        match mode {
            PinMode::Input | PinMode::Output => self.is_digital,
            PinMode::Analog => self.is_analog,
            PinMode::Pwm => self.is_pwm,
            PinMode::Servo | PinMode::Unknown => false,
        }
    }

    pub(crate) fn set_analog_id(&mut self, analog_id: u8) {
        self.analog_id = Some(analog_id);
    }

    pub(crate) fn clear_analog_id(&mut self) {
        self.analog_id = None;
    }

    pub(crate) fn set_mode(&mut self, mode: PinMode) {
        self.mode = mode;
    }

    pub(crate) fn set_digital_value(&mut self, value: DigitalValue) {
        self.digital_value = value;
    }

    pub(crate) fn set_analog_value(&mut self, value: u16) {
        self.analog_value = value;
    }
}

impl From<&PinCapabilities> for PinRecord {
    fn from(caps: &PinCapabilities) -> Self {
        Self::new(caps.digital_id, caps.is_digital, caps.is_analog, caps.is_pwm)
    }
}
