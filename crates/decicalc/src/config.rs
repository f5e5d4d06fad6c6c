//! Engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::number::DEFAULT_SCALE;

/// Largest accepted rounding scale
pub const MAX_SCALE: u32 = 1000;

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Rounding scale above [`MAX_SCALE`]
    #[error("scale must be at most {MAX_SCALE}, got {0}")]
    Scale(u32),
}

/// Tunables for [`Engine`](crate::core::Engine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fractional digits that quotients and percentages are rounded to
    pub scale: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

impl EngineConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rounding scale
    #[must_use]
    pub const fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Check that every value is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale > MAX_SCALE {
            return Err(ConfigError::Scale(self.scale));
        }
        Ok(())
    }
}
