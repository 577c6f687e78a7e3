use pinio_core::{EventSink, PinIoEvent};
use tokio::sync::mpsc;
use tracing::debug;

/// Forwards manager events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<PinIoEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<PinIoEvent>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PinIoEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: PinIoEvent) {
        if self.tx.send(event).is_err() {
            debug!(?event, "event receiver dropped");
        }
    }
}
