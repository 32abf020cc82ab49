//! Core types shared by every part of the logging system.
//!
//! ### [`error`] - Error handling
//! [`LogError`] covers the few ways setting up or flushing sinks can fail.
//! Everything else in the routing pipeline is infallible.

pub mod error;

pub use error::{LogError, LogResult};
