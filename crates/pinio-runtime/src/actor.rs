//! The task that owns the manager.
//!
//! Inbound reads, timer expiries and caller commands all arrive on one
//! channel, so the manager sees them strictly one at a time.

use pinio_core::{
    DigitalValue, FrameWriter, PinIoConfig, PinIoEvent, PinIoManager, PinIoResult, PinMode,
    PinRegistry, TimeoutToken,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::{RuntimeError, RuntimeResult};
use crate::sink::ChannelSink;
use crate::timer::TokioTimer;

pub(crate) enum Request {
    Receive(Vec<u8>),
    Timeout(TimeoutToken),
    Reset,
    QueryCapabilities,
    EndQuery {
        aborted: bool,
    },
    EnableReadReports,
    SetMode {
        digital_id: u8,
        mode: PinMode,
        reply: oneshot::Sender<PinIoResult<()>>,
    },
    SetDigitalValue {
        digital_id: u8,
        value: DigitalValue,
        reply: oneshot::Sender<PinIoResult<()>>,
    },
    SetAnalogValue {
        digital_id: u8,
        value: u16,
        reply: oneshot::Sender<PinIoResult<()>>,
    },
    SetPwmValue {
        digital_id: u8,
        value: u16,
        reply: oneshot::Sender<PinIoResult<bool>>,
    },
    SetAnalogReporting {
        digital_id: u8,
        enabled: bool,
        reply: oneshot::Sender<PinIoResult<()>>,
    },
    Registry {
        reply: oneshot::Sender<PinRegistry>,
    },
    IsQuerying {
        reply: oneshot::Sender<bool>,
    },
    Shutdown,
}

/// A running manager task.
pub struct PinIoRuntime {
    pub handle: PinIoHandle,
    pub events: mpsc::UnboundedReceiver<PinIoEvent>,
    pub task: JoinHandle<()>,
}

/// Spawn a task owning a [`PinIoManager`] that writes to `writer`.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns [`RuntimeError::PinIo`] if `config` fails validation.
pub fn spawn<W>(writer: W, config: PinIoConfig) -> RuntimeResult<PinIoRuntime>
where
    W: FrameWriter + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let (sink, events) = ChannelSink::channel();
    let timer = TokioTimer::new(tx.downgrade());
    let manager = PinIoManager::with_config(config, writer, timer, sink)?;

    let task = tokio::spawn(run(manager, rx));
    Ok(PinIoRuntime {
        handle: PinIoHandle { tx },
        events,
        task,
    })
}

async fn run<W: FrameWriter>(
    mut manager: PinIoManager<W, TokioTimer, ChannelSink>,
    mut rx: mpsc::UnboundedReceiver<Request>,
) {
    debug!("pin I/O task started");
    while let Some(request) = rx.recv().await {
        match request {
            Request::Receive(data) => manager.receive(&data),
            Request::Timeout(token) => manager.handle_timeout(token),
            Request::Reset => manager.reset(),
            Request::QueryCapabilities => manager.query_capabilities(),
            Request::EndQuery { aborted } => manager.end_query(aborted),
            Request::EnableReadReports => manager.enable_read_reports(),
            Request::SetMode {
                digital_id,
                mode,
                reply,
            } => reply_with(reply, manager.set_mode(digital_id, mode)),
            Request::SetDigitalValue {
                digital_id,
                value,
                reply,
            } => reply_with(reply, manager.set_digital_value(digital_id, value)),
            Request::SetAnalogValue {
                digital_id,
                value,
                reply,
            } => reply_with(reply, manager.set_analog_value(digital_id, value)),
            Request::SetPwmValue {
                digital_id,
                value,
                reply,
            } => {
                let now = tokio::time::Instant::now().into_std();
                reply_with(reply, manager.set_pwm_value_at(digital_id, value, now));
            }
            Request::SetAnalogReporting {
                digital_id,
                enabled,
                reply,
            } => reply_with(reply, manager.set_analog_reporting(digital_id, enabled)),
            Request::Registry { reply } => reply_with(reply, manager.registry().clone()),
            Request::IsQuerying { reply } => {
                reply_with(reply, manager.is_querying_capabilities());
            }
            Request::Shutdown => break,
        }
    }
    manager.stop();
    info!("pin I/O task stopped");
}

fn reply_with<T>(reply: oneshot::Sender<T>, value: T) {
    if reply.send(value).is_err() {
        debug!("caller stopped waiting for reply");
    }
}

/// Cloneable handle for talking to the manager task.
#[derive(Debug, Clone)]
pub struct PinIoHandle {
    tx: mpsc::UnboundedSender<Request>,
}

impl PinIoHandle {
    fn post(&self, request: Request) -> RuntimeResult<()> {
        self.tx.send(request).map_err(|_unsent| RuntimeError::Closed)
    }

    async fn call<T>(
        &self,
        request: impl FnOnce(oneshot::Sender<T>) -> Request,
    ) -> RuntimeResult<T> {
        let (reply, response) = oneshot::channel();
        self.post(request(reply))?;
        response.await.map_err(|_dropped| RuntimeError::Closed)
    }

    /// Deliver one read from the transport.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped.
    pub fn receive(&self, data: impl Into<Vec<u8>>) -> RuntimeResult<()> {
        self.post(Request::Receive(data.into()))
    }

    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped.
    pub fn reset(&self) -> RuntimeResult<()> {
        self.post(Request::Reset)
    }

    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped.
    pub fn query_capabilities(&self) -> RuntimeResult<()> {
        self.post(Request::QueryCapabilities)
    }

    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped.
    pub fn end_query(&self, aborted: bool) -> RuntimeResult<()> {
        self.post(Request::EndQuery { aborted })
    }

    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped.
    pub fn enable_read_reports(&self) -> RuntimeResult<()> {
        self.post(Request::EnableReadReports)
    }

    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped, or the
    /// manager's rejection.
    pub async fn set_mode(&self, digital_id: u8, mode: PinMode) -> RuntimeResult<()> {
        self.call(|reply| Request::SetMode {
            digital_id,
            mode,
            reply,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped, or the
    /// manager's rejection.
    pub async fn set_digital_value(&self, digital_id: u8, value: DigitalValue) -> RuntimeResult<()> {
        self.call(|reply| Request::SetDigitalValue {
            digital_id,
            value,
            reply,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped, or the
    /// manager's rejection.
    pub async fn set_analog_value(&self, digital_id: u8, value: u16) -> RuntimeResult<()> {
        self.call(|reply| Request::SetAnalogValue {
            digital_id,
            value,
            reply,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// Rate-limited PWM write, timed with the tokio clock. Returns whether
    /// the write was accepted.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped, or the
    /// manager's rejection.
    pub async fn set_pwm_value(&self, digital_id: u8, value: u16) -> RuntimeResult<bool> {
        self.call(|reply| Request::SetPwmValue {
            digital_id,
            value,
            reply,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped, or the
    /// manager's rejection.
    pub async fn set_analog_reporting(&self, digital_id: u8, enabled: bool) -> RuntimeResult<()> {
        self.call(|reply| Request::SetAnalogReporting {
            digital_id,
            enabled,
            reply,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// Snapshot of the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped.
    pub async fn registry(&self) -> RuntimeResult<PinRegistry> {
        self.call(|reply| Request::Registry { reply }).await
    }

    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has stopped.
    pub async fn is_querying_capabilities(&self) -> RuntimeResult<bool> {
        self.call(|reply| Request::IsQuerying { reply }).await
    }

    /// Ask the task to stop. Pending discovery timeouts are cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Closed`] if the task has already stopped.
    pub fn shutdown(&self) -> RuntimeResult<()> {
        self.post(Request::Shutdown)
    }
}
