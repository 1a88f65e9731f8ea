//! # Session Configuration
//!
//! Loaded once at startup, before the buffer is allocated. Nothing here
//! changes mid-session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a session configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML source did not parse into a valid configuration.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Startup configuration for a marshalling session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Capacity of the shared buffer in bytes, fixed for the session.
    pub buffer_capacity: usize,
    /// Upper bound on records written by a single query entry point.
    pub max_records_per_query: usize,
    /// Halt the host after this many cycles without a native check-in.
    pub halt_after_missed_checkins: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 64 * 1024,
            max_records_per_query: 1024,
            halt_after_missed_checkins: 10,
        }
    }
}

impl SessionConfig {
    /// Parses a configuration from TOML source.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}
