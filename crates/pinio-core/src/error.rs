//! Error types for the pin I/O core.
//!
//! Inbound traffic never surfaces these to the caller: the dispatcher logs
//! them at [`PinIoError::severity`] and drops the offending frame. Command
//! operations return them so callers can see why a request was rejected.

use std::time::Duration;

use pinio_protocol::FrameError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Severity level of a pin I/O error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Expected on a healthy link (e.g. a report split across two reads).
    Info,
    /// A frame or request was dropped.
    Warning,
    /// The link or configuration is unusable.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PinIoError {
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Unknown digital pin: {0}")]
    UnknownPin(u8),

    #[error("Unknown analog channel: {0}")]
    UnknownAnalogChannel(u8),

    #[error("Unknown pin mode code: {0:#04x}")]
    UnknownMode(u8),

    #[error("Pin discovery timed out after {0:?}")]
    DiscoveryTimeout(Duration),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl PinIoError {
    #[must_use]
    pub fn malformed_frame(msg: impl Into<String>) -> Self {
        Self::MalformedFrame(msg.into())
    }

    #[must_use]
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    #[must_use]
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Frame errors from the pin state parser, with unknown mode codes lifted
    /// into [`PinIoError::UnknownMode`].
    #[must_use]
    pub fn from_pin_state(err: FrameError) -> Self {
        match err {
            FrameError::UnknownMode(code) => Self::UnknownMode(code),
            other => Self::Frame(other),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MalformedFrame(_) => ErrorSeverity::Info,
            Self::UnknownPin(_)
            | Self::UnknownAnalogChannel(_)
            | Self::UnknownMode(_)
            | Self::DiscoveryTimeout(_)
            | Self::InvalidOperation(_)
            | Self::Frame(_)
            | Self::Transport(_) => ErrorSeverity::Warning,
            Self::InvalidConfiguration(_) => ErrorSeverity::Error,
        }
    }

    /// Whether the manager keeps working normally after this error.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Error
    }

    /// Emit a diagnostic for a dropped frame or rejected request.
    pub(crate) fn log(&self, context: &'static str) {
        match self.severity() {
            ErrorSeverity::Info => debug!(error = %self, "{context}"),
            ErrorSeverity::Warning => warn!(error = %self, "{context}"),
            ErrorSeverity::Error => error!(error = %self, "{context}"),
        }
    }
}

pub type PinIoResult<T> = Result<T, PinIoError>;
