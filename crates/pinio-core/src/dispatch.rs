//! Inbound byte routing.
//!
//! While discovery runs, bytes feed the active query stage. Otherwise each
//! read is either one pin state response or a run of streamed three-byte
//! reports. Problems with a read are logged and the read (or the offending
//! part of it) is dropped; nothing is returned to the caller.

use pinio_protocol::{
    DigitalValue, StreamFrame, decode_stream, is_pin_state_response, parse_pin_state_response,
};
use tracing::{debug, trace};

use crate::discovery::DiscoveryPhase;
use crate::error::{PinIoError, PinIoResult};
use crate::io::{DiscoveryTimer, EventSink, FrameWriter, PinIoEvent};
use crate::manager::PinIoManager;

impl<W, T, S> PinIoManager<W, T, S>
where
    W: FrameWriter,
    T: DiscoveryTimer,
    S: EventSink,
{
    /// Feed one read from the transport.
    pub fn receive(&mut self, data: &[u8]) {
        match self.discovery.phase {
            DiscoveryPhase::QueryingCapabilities => self.receive_capability_bytes(data),
            DiscoveryPhase::QueryingAnalogMapping => self.receive_mapping_bytes(data),
            DiscoveryPhase::Idle if is_pin_state_response(data) => {
                if let Err(e) = self.apply_pin_state_response(data) {
                    e.log("pin state response dropped");
                }
            }
            DiscoveryPhase::Idle => {
                self.apply_stream(data);
                self.events.emit(PinIoEvent::PinStateUpdated);
            }
        }
    }

    /// Apply an explicit pin state response: set the mode (with its reporting
    /// side effect), then either the analog value or the digital value.
    fn apply_pin_state_response(&mut self, data: &[u8]) -> PinIoResult<()> {
        let response = parse_pin_state_response(data).map_err(PinIoError::from_pin_state)?;
        let digital_id = response.digital_id;
        if self.registry.get(digital_id).is_none() {
            return Err(PinIoError::UnknownPin(digital_id));
        }

        let analog_value = response
            .analog_value()
            .filter(|_| response.mode.carries_analog_value());
        let digital_value = match analog_value {
            Some(_) => None,
            None => Some(DigitalValue::from_wire(response.state_low).ok_or_else(|| {
                PinIoError::malformed_frame(format!(
                    "digital state {:#04x} for pin {digital_id} is neither 0 nor 1",
                    response.state_low
                ))
            })?),
        };

        self.set_mode(digital_id, response.mode)?;
        if let Some(value) = analog_value {
            if let Some(pin) = self.registry.get_mut(digital_id) {
                pin.set_analog_value(value);
            }
            trace!(digital_id, value, "pin state: analog value");
        }
        if let Some(value) = digital_value {
            self.set_digital_value(digital_id, value)?;
            trace!(digital_id, %value, "pin state: digital value");
        }
        Ok(())
    }

    fn apply_stream(&mut self, data: &[u8]) {
        let report = decode_stream(data);
        if report.is_truncated() {
            PinIoError::malformed_frame(format!(
                "{} trailing byte(s) after the last complete report",
                report.trailing_bytes
            ))
            .log("partial telemetry report ignored");
        }

        for frame in &report.frames {
            match *frame {
                StreamFrame::DigitalPort { port, .. } => {
                    for (digital_id, value) in frame.pin_values() {
                        match self.registry.get_mut(digital_id) {
                            Some(pin) => pin.set_digital_value(value),
                            None => trace!(digital_id, port, "digital report for unknown pin"),
                        }
                    }
                }
                StreamFrame::Analog { channel, value } => {
                    match self.registry.by_analog_mut(channel) {
                        Some(pin) => pin.set_analog_value(value),
                        None => debug!(
                            error = %PinIoError::UnknownAnalogChannel(channel),
                            "analog report ignored"
                        ),
                    }
                }
                StreamFrame::Unrecognized { header } => {
                    debug!(header, "unrecognized telemetry report ignored");
                }
            }
        }
    }
}
