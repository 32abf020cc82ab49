//! Per-layer building blocks for the fan-out subscriber

pub mod severity;

pub use severity::{Band, SeverityPredicate};
