//! Shared test utilities for the pin I/O crates.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`mock`] - Recording transport and timer doubles
//! - [`fixtures`] - Captured board responses and ready-made managers
//! - [`prelude`] - Convenience re-exports
//!
//! ```rust,ignore
//! use pinio_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::panic, reason = "test helpers report failures by panicking")]

pub mod fixtures;
pub mod mock;
pub mod must;
pub mod prelude;

pub use must::*;
