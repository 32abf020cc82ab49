//! File rotation settings

use serde::{Deserialize, Serialize};

/// Rotation settings applied to both file destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateConfig {
    /// Rotate files instead of appending forever
    pub enabled: bool,
    /// Rotate once the active file grows past this many bytes
    pub max_size_bytes: u64,
    /// Rotated files to keep
    pub max_backups: usize,
    /// Rotated files older than this are removed
    pub max_age_days: u32,
    /// Gzip rotated files
    pub compress: bool,
}

impl RotateConfig {
    /// 32 MiB
    pub const DEFAULT_MAX_SIZE_BYTES: u64 = 32 * 1024 * 1024;
    /// Five backups
    pub const DEFAULT_MAX_BACKUPS: usize = 5;
    /// Thirty days
    pub const DEFAULT_MAX_AGE_DAYS: u32 = 30;

    /// Rotation turned on with the default limits
    pub const fn enabled() -> Self {
        Self {
            enabled: true,
            max_size_bytes: Self::DEFAULT_MAX_SIZE_BYTES,
            max_backups: Self::DEFAULT_MAX_BACKUPS,
            max_age_days: Self::DEFAULT_MAX_AGE_DAYS,
            compress: true,
        }
    }

    /// Maximum backup age
    pub fn max_age(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.max_age_days) * 24 * 60 * 60)
    }
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ..Self::enabled()
        }
    }
}
