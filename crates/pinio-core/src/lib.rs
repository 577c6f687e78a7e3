//! Pin I/O core for a Firmata-derived microcontroller link.
//!
//! [`PinIoManager`] discovers the board's pins (capability query, then analog
//! mapping query, with a timeout that falls back to a fixed default layout),
//! keeps a [`PinRegistry`] of per-pin state, encodes mode and value commands
//! and applies inbound telemetry.
//!
//! The manager performs no I/O of its own. It is driven by two inputs,
//! [`PinIoManager::receive`] and [`PinIoManager::handle_timeout`], and talks
//! to the outside world through three collaborators:
//!
//! - [`FrameWriter`] sends command frames
//! - [`DiscoveryTimer`] arms and cancels the discovery timeout
//! - [`EventSink`] receives [`PinIoEvent`] notifications
//!
//! ```
//! use pinio_core::{NullTimer, PinIoEvent, PinIoManager};
//!
//! let mut manager = PinIoManager::new(Vec::<Vec<u8>>::new(), NullTimer, Vec::<PinIoEvent>::new());
//! manager.query_capabilities();
//! manager.end_query(true);
//!
//! assert_eq!(manager.registry().len(), 12);
//! assert_eq!(
//!     manager.events(),
//!     &vec![PinIoEvent::DiscoveryFinished { used_default: true }]
//! );
//! ```

#![deny(static_mut_refs)]

mod commands;
pub mod config;
pub mod discovery;
mod dispatch;
pub mod error;
pub mod io;
pub mod layout;
pub mod manager;
pub mod pin;
pub mod port_mask;
pub mod rate_limiter;
pub mod registry;
pub mod transition;

pub use config::{PinIoConfig, PinIoConfigBuilder};
pub use discovery::DiscoveryPhase;
pub use error::{ErrorSeverity, PinIoError, PinIoResult};
pub use io::{
    DiscoveryTimer, EventSink, FnSink, FrameWriter, NullSink, NullTimer, PinIoEvent,
    TimeoutToken, TransportError,
};
pub use layout::default_layout;
pub use manager::PinIoManager;
pub use pin::PinRecord;
pub use port_mask::PortMaskCache;
pub use rate_limiter::WriteRateLimiter;
pub use registry::PinRegistry;
pub use transition::ReportingAction;

pub use pinio_protocol::{DigitalValue, PinMode};
