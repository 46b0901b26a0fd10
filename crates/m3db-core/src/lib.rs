//! # m3db-core
//!
//! Format-agnostic abstractions for the M3dB plugin.
//!
//! This crate defines what a plugin does independently of the binary
//! interface a host loads it through. It has no external dependencies.
//!
//! ## Main Traits
//!
//! - [`Plugin`] - Processing and parameter access
//! - [`Sample`] - f32/f64 sample abstraction
//!
//! ## Types
//!
//! - [`Buffer`] / [`Channel`] - Audio I/O for one processing block
//! - [`PluginConfig`] - Shared plugin metadata
//! - [`PluginError`] - Error types

pub mod buffer;
pub mod config;
pub mod error;
pub mod plugin;
pub mod sample;
pub mod types;

// Re-exports for convenience
pub use buffer::{Buffer, Channel};
pub use config::PluginConfig;
pub use error::{PluginError, PluginResult};
pub use plugin::Plugin;
pub use sample::Sample;
pub use types::{ParamIndex, MAX_CHANNELS};
