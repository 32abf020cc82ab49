//! Format utilities (time)

use std::fmt;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, UtcTime};

use crate::config::Mode;

/// RFC 3339 UTC timestamps with millisecond precision, for people
pub fn human_timer() -> impl FormatTime + Send + Sync + 'static {
    UtcTime::new(time::macros::format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))
}

/// Seconds since the Unix epoch with microsecond fraction, for machines
#[derive(Debug, Clone, Copy, Default)]
pub struct EpochTime;

impl FormatTime for EpochTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = time::OffsetDateTime::now_utc();
        write!(w, "{}.{:06}", now.unix_timestamp(), now.microsecond())
    }
}

impl Mode {
    /// Whether records are laid out for log collectors rather than terminals
    pub fn machine_oriented(self) -> bool {
        matches!(self, Self::Production)
    }
}
