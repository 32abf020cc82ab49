//! Severity predicates
//!
//! Each sink binding gates its fmt layer with one of three shapes:
//!
//! | Shape      | Accepts              | Used for                                  |
//! |------------|----------------------|-------------------------------------------|
//! | low band   | `level < Error`      | primary file when an error file exists    |
//! | high band  | `level >= Error`     | error file                                |
//! | floor      | `level >= configured`| console, primary file without error file  |

use tracing::Metadata;
use tracing_subscriber::layer::{Context, Filter};

use crate::config::Level;

/// Comparison direction of a [`SeverityPredicate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Strictly below the threshold
    Low,
    /// At or above the threshold, threshold fixed to `Error`
    High,
    /// At or above the configured level
    Floor,
}

/// Pure level filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeverityPredicate {
    band: Band,
    threshold: Level,
}

impl SeverityPredicate {
    /// Everything below `Error`
    pub const fn low_band() -> Self {
        Self {
            band: Band::Low,
            threshold: Level::Error,
        }
    }

    /// `Error` only
    pub const fn high_band() -> Self {
        Self {
            band: Band::High,
            threshold: Level::Error,
        }
    }

    /// Everything at or above `level`
    pub const fn floor(level: Level) -> Self {
        Self {
            band: Band::Floor,
            threshold: level,
        }
    }

    /// Comparison direction
    pub fn band(&self) -> Band {
        self.band
    }

    /// Level the comparison is made against
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Whether a record at `level` passes
    #[inline]
    pub fn accepts(&self, level: Level) -> bool {
        match self.band {
            Band::Low => level < self.threshold,
            Band::High | Band::Floor => level >= self.threshold,
        }
    }
}

impl<S> Filter<S> for SeverityPredicate {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        Level::from_tracing(meta.level()).is_some_and(|level| self.accepts(level))
    }
}
