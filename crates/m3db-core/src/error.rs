//! Error types for the M3dB crates.

use std::fmt;

/// Errors that can occur while setting up an M3dB plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// Plugin configuration is inconsistent.
    InvalidConfig(String),
    /// A string does not fit the fixed-size field the host provides for it.
    StringTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::StringTooLong { field, len, max } => write!(
                f,
                "String too long: {} is {} bytes, at most {} fit",
                field, len, max
            ),
        }
    }
}

impl std::error::Error for PluginError {}

/// Result type for M3dB operations.
pub type PluginResult<T> = Result<T, PluginError>;
