//! Recording doubles for the manager's collaborators.
//!
//! The manager owns its collaborators, so tests inspect them through
//! `PinIoManager::writer()` and `PinIoManager::timer()`.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use pinio_core::{DiscoveryTimer, FrameWriter, TimeoutToken, TransportError};

/// Transport double that records every frame it is asked to send.
#[derive(Debug, Clone, Default)]
pub struct RecordingWriter {
    frames: Vec<Vec<u8>>,
    pub fail_on_send: bool,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer whose sends all fail. Failed frames are still recorded.
    pub fn with_failure() -> Self {
        Self {
            fail_on_send: true,
            ..Self::new()
        }
    }

    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[u8]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Drain the recorded frames.
    pub fn take_frames(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.frames)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn total_sends(&self) -> usize {
        self.frames.len()
    }
}

impl FrameWriter for RecordingWriter {
    fn send(&mut self, frame: &[u8]) -> Result<usize, TransportError> {
        self.frames.push(frame.to_vec());
        if self.fail_on_send {
            return Err("mock send failure".into());
        }
        Ok(frame.len())
    }
}

/// Recording transport whose frames stay readable after the writer has been
/// moved into another task.
#[derive(Debug, Clone, Default)]
pub struct SharedRecordingWriter {
    frames: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl SharedRecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().clone()
    }

    pub fn last_frame(&self) -> Option<Vec<u8>> {
        self.frames.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.frames.lock().clear();
    }

    pub fn total_sends(&self) -> usize {
        self.frames.lock().len()
    }
}

impl FrameWriter for SharedRecordingWriter {
    fn send(&mut self, frame: &[u8]) -> Result<usize, TransportError> {
        self.frames.lock().push(frame.to_vec());
        Ok(frame.len())
    }
}

/// Timer double: records arm and cancel calls and never fires by itself.
#[derive(Debug, Clone, Default)]
pub struct RecordingTimer {
    armed: Vec<(TimeoutToken, Duration)>,
    cancelled: Vec<TimeoutToken>,
}

impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> &[(TimeoutToken, Duration)] {
        &self.armed
    }

    pub fn cancelled(&self) -> &[TimeoutToken] {
        &self.cancelled
    }

    /// The most recently armed token, unless it has been cancelled.
    pub fn pending(&self) -> Option<TimeoutToken> {
        let (token, _) = self.armed.last()?;
        (!self.cancelled.contains(token)).then_some(*token)
    }

    /// Number of armed timeouts that have not been cancelled.
    pub fn pending_count(&self) -> usize {
        self.armed
            .iter()
            .filter(|(token, _)| !self.cancelled.contains(token))
            .count()
    }
}

impl DiscoveryTimer for RecordingTimer {
    fn arm(&mut self, token: TimeoutToken, after: Duration) {
        self.armed.push((token, after));
    }

    fn cancel(&mut self, token: TimeoutToken) {
        self.cancelled.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_records() -> Result<(), TransportError> {
        let mut writer = RecordingWriter::new();
        writer.send(&[0xFF])?;
        writer.send(&[0xF0, 0x6B, 0xF7])?;
        assert_eq!(writer.total_sends(), 2);
        assert_eq!(writer.last_frame(), Some(&[0xF0, 0x6B, 0xF7][..]));
        assert_eq!(writer.take_frames().len(), 2);
        assert_eq!(writer.total_sends(), 0);
        Ok(())
    }

    #[test]
    fn test_failing_writer() {
        let mut writer = RecordingWriter::with_failure();
        assert!(writer.send(&[0xFF]).is_err());
        assert_eq!(writer.total_sends(), 1);
    }

    #[test]
    fn test_shared_writer_clones_share_frames() -> Result<(), TransportError> {
        let observer = SharedRecordingWriter::new();
        let mut writer = observer.clone();
        writer.send(&[0xD0, 0x01])?;
        assert_eq!(observer.last_frame(), Some(vec![0xD0, 0x01]));
        observer.clear();
        assert_eq!(writer.total_sends(), 0);
        Ok(())
    }

    #[test]
    fn test_timer_pending() {
        let mut timer = RecordingTimer::new();
        assert_eq!(timer.pending(), None);
        timer.arm(TimeoutToken::new(0), Duration::from_secs(5));
        assert_eq!(timer.pending(), Some(TimeoutToken::new(0)));
        timer.cancel(TimeoutToken::new(0));
        timer.arm(TimeoutToken::new(1), Duration::from_secs(5));
        assert_eq!(timer.pending(), Some(TimeoutToken::new(1)));
        assert_eq!(timer.pending_count(), 1);
    }
}
