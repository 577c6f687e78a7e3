//! Wire protocol for Firmata-derived pin I/O over a byte stream.
//!
//! This crate is intentionally I/O-free. It provides pure functions and types
//! for the subset of the Firmata sysex protocol used by the pin manager:
//!
//! - capability query / response
//! - analog mapping query / response
//! - pin state response
//! - streamed digital port and analog channel reports
//! - mode, port-write, analog-write and reporting commands
//!
//! Servo and I2C capability bits are recognised while parsing but carry no
//! behaviour of their own.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]

pub mod analog_mapping;
pub mod capability;
pub mod constants;
pub mod error;
pub mod output;
pub mod pin_state;
pub mod telemetry;
pub mod types;

pub use analog_mapping::{AnalogMapping, parse_analog_mapping_response};
pub use capability::{PinCapabilities, parse_capability_response};
pub use constants::{
    END_SYSEX, MAX_ANALOG_VALUE, MAX_NIBBLE_CHANNEL, PINS_PER_PORT, START_SYSEX, sysex_payload,
};
pub use error::{FrameError, FrameResult};
pub use output::{
    build_analog_mapping_query, build_analog_write, build_capability_query,
    build_digital_port_write, build_report_analog, build_report_digital, build_set_pin_mode,
    build_system_reset,
};
pub use pin_state::{PinStateResponse, is_pin_state_response, parse_pin_state_response};
pub use telemetry::{StreamFrame, StreamReport, decode_stream};
pub use types::{DigitalValue, PinMode};
