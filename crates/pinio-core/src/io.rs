//! Collaborator interfaces: outbound transport, discovery timer and event
//! delivery.

use std::time::Duration;

use serde::Serialize;

pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Sends raw command frames to the board.
///
/// Sends are fire-and-forget; the manager logs a failed send and carries on.
pub trait FrameWriter: Send {
    fn send(&mut self, frame: &[u8]) -> Result<usize, TransportError>;
}

impl<W: FrameWriter + ?Sized> FrameWriter for Box<W> {
    fn send(&mut self, frame: &[u8]) -> Result<usize, TransportError> {
        (**self).send(frame)
    }
}

/// Collects every frame. Useful for dry runs and offline decoding.
impl FrameWriter for Vec<Vec<u8>> {
    fn send(&mut self, frame: &[u8]) -> Result<usize, TransportError> {
        self.push(frame.to_vec());
        Ok(frame.len())
    }
}

/// Identifies one armed discovery timeout. A newer token supersedes every
/// older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeoutToken(u64);

impl TimeoutToken {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// One-shot timer for the capability query.
///
/// When an armed timeout expires the runtime must call
/// [`PinIoManager::handle_timeout`](crate::PinIoManager::handle_timeout) with
/// the same token. Late or cancelled expiries are ignored by the manager.
pub trait DiscoveryTimer: Send {
    fn arm(&mut self, token: TimeoutToken, after: Duration);
    fn cancel(&mut self, token: TimeoutToken);
}

/// A timer that never fires. Discovery then only ends on a complete
/// response or an explicit [`end_query`](crate::PinIoManager::end_query).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTimer;

impl DiscoveryTimer for NullTimer {
    fn arm(&mut self, _token: TimeoutToken, _after: Duration) {}
    fn cancel(&mut self, _token: TimeoutToken) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PinIoEvent {
    /// Discovery ended. `used_default` is set when the fallback layout was
    /// installed instead of the board's answer.
    DiscoveryFinished { used_default: bool },
    /// A telemetry buffer was applied; re-read the registry.
    PinStateUpdated,
}

pub trait EventSink: Send {
    fn emit(&mut self, event: PinIoEvent);
}

impl EventSink for Vec<PinIoEvent> {
    fn emit(&mut self, event: PinIoEvent) {
        self.push(event);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: PinIoEvent) {}
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(PinIoEvent) + Send> EventSink for FnSink<F> {
    fn emit(&mut self, event: PinIoEvent) {
        (self.0)(event);
    }
}
