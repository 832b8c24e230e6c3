//! Resolver configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Default number of provider queries per `get_endpoint` call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Configuration for the [`Resolver`](crate::Resolver).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum provider queries per call (including the first).
    pub max_attempts: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}
