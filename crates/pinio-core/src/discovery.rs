//! Capability and analog mapping discovery.
//!
//! ```text
//! Idle --query_capabilities--> QueryingCapabilities --0xF7--> QueryingAnalogMapping
//!   ^                                  |                               |
//!   +------------ timeout / end_query(true) ------+        0xF7 / end_query(false)
//!   +-------------------------------------------------------------------+
//! ```
//!
//! Responses may arrive split across any number of reads, so each stage
//! buffers bytes until it sees the sysex terminator. Bytes that follow the
//! terminator in the same read are discarded.

use pinio_protocol::{
    END_SYSEX, build_analog_mapping_query, build_capability_query, build_system_reset,
    parse_analog_mapping_response, parse_capability_response,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::PinIoError;
use crate::io::{DiscoveryTimer, EventSink, FrameWriter, PinIoEvent, TimeoutToken};
use crate::layout::default_layout;
use crate::manager::PinIoManager;
use crate::pin::PinRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DiscoveryPhase {
    #[default]
    Idle,
    QueryingCapabilities,
    QueryingAnalogMapping,
}

#[derive(Debug, Default)]
pub(crate) struct DiscoveryState {
    pub(crate) phase: DiscoveryPhase,
    capability_buffer: Vec<u8>,
    mapping_buffer: Vec<u8>,
    pending_timeout: Option<TimeoutToken>,
    last_token: Option<TimeoutToken>,
}

impl DiscoveryState {
    fn clear_buffers(&mut self) {
        self.capability_buffer.clear();
        self.mapping_buffer.clear();
    }

    fn next_token(&mut self) -> TimeoutToken {
        let token = self
            .last_token
            .map_or(TimeoutToken::new(0), TimeoutToken::next);
        self.last_token = Some(token);
        token
    }
}

/// Append `data` to `buffer` up to and including the first terminator.
/// Returns true if the terminator was seen.
fn buffer_until_terminator(buffer: &mut Vec<u8>, data: &[u8]) -> bool {
    match data.iter().position(|&b| b == END_SYSEX) {
        Some(end) => {
            buffer.extend_from_slice(data.get(..=end).unwrap_or(data));
            true
        }
        None => {
            buffer.extend_from_slice(data);
            false
        }
    }
}

impl<W, T, S> PinIoManager<W, T, S>
where
    W: FrameWriter,
    T: DiscoveryTimer,
    S: EventSink,
{
    pub fn phase(&self) -> DiscoveryPhase {
        self.discovery.phase
    }

    pub fn is_querying_capabilities(&self) -> bool {
        self.discovery.phase != DiscoveryPhase::Idle
    }

    /// Return to idle, drop every pin and send a system reset. Does not start
    /// discovery.
    pub fn reset(&mut self) {
        self.cancel_discovery_timeout();
        self.discovery.phase = DiscoveryPhase::Idle;
        self.discovery.clear_buffers();
        self.registry.clear();
        debug!("system reset");
        self.send(&build_system_reset());
    }

    /// Start a discovery cycle. A cycle already in flight is superseded.
    pub fn query_capabilities(&mut self) {
        self.cancel_discovery_timeout();
        self.registry.clear();
        self.discovery.clear_buffers();
        self.discovery.phase = DiscoveryPhase::QueryingCapabilities;
        debug!("querying capabilities");
        self.send(&build_capability_query());

        let token = self.discovery.next_token();
        self.discovery.pending_timeout = Some(token);
        self.timer.arm(token, self.config.discovery_timeout());
    }

    fn query_analog_mapping(&mut self) {
        self.discovery.phase = DiscoveryPhase::QueryingAnalogMapping;
        self.discovery.mapping_buffer.clear();
        debug!("querying analog mapping");
        self.send(&build_analog_mapping_query());
    }

    pub(crate) fn receive_capability_bytes(&mut self, data: &[u8]) {
        if buffer_until_terminator(&mut self.discovery.capability_buffer, data) {
            debug!(
                len = self.discovery.capability_buffer.len(),
                "capability response complete"
            );
            self.cancel_discovery_timeout();
            self.query_analog_mapping();
        }
    }

    pub(crate) fn receive_mapping_bytes(&mut self, data: &[u8]) {
        if buffer_until_terminator(&mut self.discovery.mapping_buffer, data) {
            debug!(
                len = self.discovery.mapping_buffer.len(),
                "analog mapping response complete"
            );
            self.end_query(false);
        }
    }

    /// Finish the discovery cycle.
    ///
    /// Unless `aborted`, the buffered responses are parsed into the registry.
    /// If aborted, or either response is missing, the default layout is
    /// installed instead. Either way, reporting is re-enabled, every pin's mode
    /// is re-sent and a [`PinIoEvent::DiscoveryFinished`] is emitted.
    pub fn end_query(&mut self, aborted: bool) {
        self.cancel_discovery_timeout();
        self.discovery.phase = DiscoveryPhase::Idle;

        let used_default = aborted
            || self.discovery.capability_buffer.is_empty()
            || self.discovery.mapping_buffer.is_empty();

        if used_default {
            self.registry.replace(default_layout());
        } else {
            let capabilities = parse_capability_response(&self.discovery.capability_buffer);
            self.registry
                .replace(capabilities.iter().map(PinRecord::from));
            let mapping = parse_analog_mapping_response(&self.discovery.mapping_buffer);
            self.registry.apply_analog_mapping(&mapping);
        }

        self.enable_read_reports();
        self.discovery.clear_buffers();

        info!(
            used_default,
            digital = self.registry.digital_pin_count(),
            analog = self.registry.analog_pin_count(),
            "pin discovery finished"
        );
        self.events.emit(PinIoEvent::DiscoveryFinished { used_default });
    }

    /// Handle an expired discovery timeout. Tokens other than the one
    /// currently armed are ignored.
    pub fn handle_timeout(&mut self, token: TimeoutToken) {
        if self.discovery.pending_timeout != Some(token) {
            debug!(token = token.get(), "ignoring stale discovery timeout");
            return;
        }
        self.discovery.pending_timeout = None;
        PinIoError::DiscoveryTimeout(self.config.discovery_timeout())
            .log("falling back to default pin layout");
        self.end_query(true);
    }

    /// Cancel any pending discovery timeout.
    pub fn stop(&mut self) {
        self.cancel_discovery_timeout();
    }

    fn cancel_discovery_timeout(&mut self) {
        if let Some(token) = self.discovery.pending_timeout.take() {
            self.timer.cancel(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_until_terminator() {
        let mut buffer = Vec::new();
        assert!(!buffer_until_terminator(&mut buffer, &[0xF0, 0x6B, 0x00]));
        assert!(buffer_until_terminator(&mut buffer, &[0x01, 0x7F, 0xF7, 0x90, 0x00]));
        assert_eq!(buffer, [0xF0, 0x6B, 0x00, 0x01, 0x7F, 0xF7]);
    }

    #[test]
    fn test_buffer_empty_chunk() {
        let mut buffer = vec![0xF0];
        assert!(!buffer_until_terminator(&mut buffer, &[]));
        assert_eq!(buffer, [0xF0]);
    }

    #[test]
    fn test_token_sequence() {
        let mut state = DiscoveryState::default();
        let first = state.next_token();
        let second = state.next_token();
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }
}
