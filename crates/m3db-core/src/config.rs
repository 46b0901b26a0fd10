//! Shared plugin configuration.
//!
//! Format-agnostic plugin metadata. Format-specific settings (VST2 unique
//! ID, plug category, vendor version) live in the format crate.
//!
//! # Example
//!
//! ```ignore
//! use m3db_core::PluginConfig;
//!
//! pub static CONFIG: PluginConfig = PluginConfig::new("My Plugin")
//!     .with_vendor("My Company")
//!     .with_io(2, 2);
//! ```

use crate::error::{PluginError, PluginResult};
use crate::types::MAX_CHANNELS;

/// Format-agnostic plugin configuration.
///
/// Channel, parameter and program counts are fixed for the lifetime of a
/// plugin instance.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Plugin name displayed in the DAW.
    pub name: &'static str,

    /// Vendor/company name.
    pub vendor: &'static str,

    /// Number of input channels.
    pub num_inputs: usize,

    /// Number of output channels.
    pub num_outputs: usize,

    /// Number of automatable parameters.
    pub num_parameters: usize,

    /// Number of programs (presets).
    pub num_programs: usize,
}

impl PluginConfig {
    /// Create a new plugin configuration with default values.
    ///
    /// Defaults to stereo in, stereo out, no parameters and no programs.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            vendor: "Unknown Vendor",
            num_inputs: 2,
            num_outputs: 2,
            num_parameters: 0,
            num_programs: 0,
        }
    }

    /// Set the vendor name.
    pub const fn with_vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    /// Set the input and output channel counts.
    pub const fn with_io(mut self, num_inputs: usize, num_outputs: usize) -> Self {
        self.num_inputs = num_inputs;
        self.num_outputs = num_outputs;
        self
    }

    /// Set the number of parameters.
    pub const fn with_parameters(mut self, num_parameters: usize) -> Self {
        self.num_parameters = num_parameters;
        self
    }

    /// Set the number of programs.
    pub const fn with_programs(mut self, num_programs: usize) -> Self {
        self.num_programs = num_programs;
        self
    }

    /// Check that the configuration describes a plugin the wrappers can host.
    pub fn validate(&self) -> PluginResult<()> {
        if self.name.is_empty() {
            return Err(PluginError::InvalidConfig("plugin name is empty".into()));
        }
        if self.num_inputs > MAX_CHANNELS || self.num_outputs > MAX_CHANNELS {
            return Err(PluginError::InvalidConfig(format!(
                "{} in / {} out exceeds the {} channel limit",
                self.num_inputs, self.num_outputs, MAX_CHANNELS
            )));
        }
        // Only input-count channels are processed, each into its own output.
        if self.num_outputs < self.num_inputs {
            return Err(PluginError::InvalidConfig(format!(
                "{} outputs cannot receive {} processed inputs",
                self.num_outputs, self.num_inputs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PluginConfig::new("Test");
        assert_eq!(config.vendor, "Unknown Vendor");
        assert_eq!((config.num_inputs, config.num_outputs), (2, 2));
        assert_eq!((config.num_parameters, config.num_programs), (0, 0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_in_const_context() {
        const CONFIG: PluginConfig = PluginConfig::new("Test")
            .with_vendor("Vendor")
            .with_io(1, 4)
            .with_parameters(3)
            .with_programs(1);
        assert_eq!(CONFIG.vendor, "Vendor");
        assert_eq!(CONFIG.num_outputs, 4);
        assert_eq!(CONFIG.num_parameters, 3);
    }

    #[test]
    fn test_validate_rejects_too_many_channels() {
        let config = PluginConfig::new("Test").with_io(MAX_CHANNELS + 1, MAX_CHANNELS + 1);
        assert!(matches!(config.validate(), Err(PluginError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_fewer_outputs_than_inputs() {
        let config = PluginConfig::new("Test").with_io(2, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        assert!(PluginConfig::new("").validate().is_err());
    }
}
