//! Configuration types and builders
//!
//! This module provides configuration types for the logging system, organized into:
//! - `base`: Core configuration structs (Config, Level, Mode)
//! - `rotate`: File rotation settings
//! - `builder`: Ordered option mutators that produce a frozen [`Config`]
//! - `presets`: Pre-configured setups (development, production, environment)

mod base;
mod builder;
mod presets;
mod rotate;

// Re-export all public types
pub use base::{Config, Level, Mode};
pub use builder::ConfigBuilder;
pub use rotate::RotateConfig;
