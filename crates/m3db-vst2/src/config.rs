//! VST2-specific plugin configuration.
//!
//! Complements the shared [`m3db_core::PluginConfig`] with the values only
//! the VST2 descriptor and dispatcher need.

use m3db_core::{PluginConfig, PluginError, PluginResult};

use crate::api::{PlugCategory, MAX_EFFECT_NAME_LEN, MAX_VENDOR_STR_LEN};

/// VST2-specific plugin configuration.
///
/// # Example
///
/// ```ignore
/// use m3db_vst2::{fourcc, PlugCategory, Vst2Config};
///
/// pub static VST2_CONFIG: Vst2Config = Vst2Config::new(fourcc(b"usan"))
///     .with_version(1000)
///     .with_category(PlugCategory::Effect);
/// ```
#[derive(Debug, Clone)]
pub struct Vst2Config {
    /// Registered four character plugin identifier.
    pub unique_id: i32,

    /// Version reported in the descriptor and for `GetVendorVersion`.
    pub version: i32,

    /// Category reported for `GetPlugCategory`.
    pub category: PlugCategory,
}

impl Vst2Config {
    /// Create a new VST2 configuration for an effect at version 1000.
    pub const fn new(unique_id: i32) -> Self {
        Self {
            unique_id,
            version: 1000,
            category: PlugCategory::Effect,
        }
    }

    /// Set the plugin version.
    pub const fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Set the plugin category.
    pub const fn with_category(mut self, category: PlugCategory) -> Self {
        self.category = category;
        self
    }

    /// Check this configuration together with the shared one.
    ///
    /// Strings must fit the host buffers including their terminator, and
    /// counts must fit the descriptor's `i32` fields.
    pub fn validate(&self, config: &PluginConfig) -> PluginResult<()> {
        config.validate()?;

        if self.unique_id == 0 {
            return Err(PluginError::InvalidConfig("unique id is zero".into()));
        }
        check_fits("vendor", config.vendor, MAX_VENDOR_STR_LEN)?;
        check_fits("name", config.name, MAX_EFFECT_NAME_LEN)?;

        for (what, count) in [
            ("parameter count", config.num_parameters),
            ("program count", config.num_programs),
        ] {
            if i32::try_from(count).is_err() {
                return Err(PluginError::InvalidConfig(format!("{} {} overflows i32", what, count)));
            }
        }
        Ok(())
    }
}

fn check_fits(field: &'static str, value: &str, buffer_len: usize) -> PluginResult<()> {
    let max = buffer_len - 1;
    if value.len() > max {
        return Err(PluginError::StringTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}
