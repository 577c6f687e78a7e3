//! Tokio host for the pin I/O manager.
//!
//! [`spawn`] moves a [`pinio_core::PinIoManager`] into its own task. The
//! transport's read side forwards each read with [`PinIoHandle::receive`];
//! callers issue commands through cloned [`PinIoHandle`]s and consume
//! [`pinio_core::PinIoEvent`]s from [`PinIoRuntime::events`]. The discovery
//! timeout runs on `tokio::time`, so tests can drive it with a paused clock.

#![deny(static_mut_refs)]

mod actor;
mod error;
mod sink;
mod timer;

pub use actor::{PinIoHandle, PinIoRuntime, spawn};
pub use error::{RuntimeError, RuntimeResult};
pub use sink::ChannelSink;
pub use timer::TokioTimer;
