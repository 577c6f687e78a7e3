//! The pin I/O manager: owns the registry and drives the collaborators.
//!
//! Operations are split across modules by concern:
//!
//! - `discovery`: reset, capability and analog mapping queries, timeouts
//! - `commands`: mode changes and value writes
//! - `dispatch`: inbound byte routing and telemetry
//!
//! The manager is single-threaded and never blocks. A concurrent host must
//! serialise every call, for example by owning the manager in one task.

use tracing::trace;

use crate::config::PinIoConfig;
use crate::discovery::DiscoveryState;
use crate::error::{PinIoError, PinIoResult};
use crate::io::{DiscoveryTimer, EventSink, FrameWriter};
use crate::port_mask::PortMaskCache;
use crate::rate_limiter::WriteRateLimiter;
use crate::registry::PinRegistry;

pub struct PinIoManager<W, T, S> {
    pub(crate) config: PinIoConfig,
    pub(crate) writer: W,
    pub(crate) timer: T,
    pub(crate) events: S,
    pub(crate) registry: PinRegistry,
    pub(crate) discovery: DiscoveryState,
    pub(crate) port_masks: PortMaskCache,
    pub(crate) pwm_limiter: WriteRateLimiter,
}

impl<W, T, S> PinIoManager<W, T, S>
where
    W: FrameWriter,
    T: DiscoveryTimer,
    S: EventSink,
{
    /// Create a manager with the default configuration and an empty registry.
    pub fn new(writer: W, timer: T, events: S) -> Self {
        Self::from_valid_config(PinIoConfig::default(), writer, timer, events)
    }

    /// Create a manager with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PinIoError::InvalidConfiguration`](crate::PinIoError::InvalidConfiguration)
    /// if the configuration fails validation.
    pub fn with_config(config: PinIoConfig, writer: W, timer: T, events: S) -> PinIoResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config, writer, timer, events))
    }

    fn from_valid_config(config: PinIoConfig, writer: W, timer: T, events: S) -> Self {
        Self {
            port_masks: PortMaskCache::new(config.port_count),
            pwm_limiter: WriteRateLimiter::new(config.pwm_min_interval()),
            config,
            writer,
            timer,
            events,
            registry: PinRegistry::new(),
            discovery: DiscoveryState::default(),
        }
    }

    pub fn config(&self) -> &PinIoConfig {
        &self.config
    }

    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    pub fn digital_pin_count(&self) -> usize {
        self.registry.digital_pin_count()
    }

    pub fn analog_pin_count(&self) -> usize {
        self.registry.analog_pin_count()
    }

    pub fn port_masks(&self) -> &PortMaskCache {
        &self.port_masks
    }

    pub fn pwm_limiter(&self) -> &WriteRateLimiter {
        &self.pwm_limiter
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn events(&self) -> &S {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut S {
        &mut self.events
    }

    pub fn into_parts(self) -> (W, T, S) {
        (self.writer, self.timer, self.events)
    }

    pub(crate) fn send(&mut self, frame: &[u8]) {
        match self.writer.send(frame) {
            Ok(written) => trace!(?frame, written, "frame sent"),
            Err(e) => PinIoError::Transport(e.to_string()).log("failed to send frame"),
        }
    }
}
