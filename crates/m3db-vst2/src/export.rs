//! VST2 export macro and entry point.

use m3db_core::{Plugin, PluginConfig};

use crate::api::{AEffect, HostCallbackProc};
use crate::config::Vst2Config;
use crate::instance::Vst2Instance;

/// Create a plugin instance for a host load request.
///
/// Configuration problems are logged and never prevent construction; the
/// returned descriptor is never null.
pub fn plugin_main<P: Plugin + Default>(
    host_callback: Option<HostCallbackProc>,
    config: &'static PluginConfig,
    vst2_config: &'static Vst2Config,
) -> *mut AEffect {
    log::debug!("VSTPluginMain called for {}", config.name);

    if host_callback.is_none() {
        log::warn!("{}: host passed a null callback", config.name);
    }
    if let Err(e) = vst2_config.validate(config) {
        log::error!("{}: {}", config.name, e);
    }

    Vst2Instance::create(host_callback, config, vst2_config, P::default())
}

/// Generate the VST2 entry points for a plugin.
///
/// Exports `VSTPluginMain`, plus `main_macho` on macOS where older hosts
/// look for it.
///
/// # Example
///
/// ```rust,ignore
/// use m3db_core::PluginConfig;
/// use m3db_vst2::{export_vst2, fourcc, Vst2Config};
///
/// static CONFIG: PluginConfig = PluginConfig::new("My Plugin")
///     .with_vendor("My Company");
///
/// static VST2_CONFIG: Vst2Config = Vst2Config::new(fourcc(b"mypl"));
///
/// export_vst2!(CONFIG, VST2_CONFIG, MyPlugin);
/// ```
#[macro_export]
macro_rules! export_vst2 {
    ($config:expr, $vst2_config:expr, $plugin:ty) => {
        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "C" fn VSTPluginMain(
            host_callback: Option<$crate::api::HostCallbackProc>,
        ) -> *mut $crate::api::AEffect {
            $crate::plugin_main::<$plugin>(host_callback, &$config, &$vst2_config)
        }

        #[cfg(target_os = "macos")]
        #[no_mangle]
        pub extern "C" fn main_macho(
            host_callback: Option<$crate::api::HostCallbackProc>,
        ) -> *mut $crate::api::AEffect {
            VSTPluginMain(host_callback)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{fourcc, OpCode};
    use m3db_core::{Buffer, Sample};
    use std::ptr;

    #[derive(Default)]
    struct Silent;

    impl Plugin for Silent {
        fn process<S: Sample>(&mut self, buffer: &mut Buffer<'_, S>) {
            buffer.apply_gain(S::ZERO);
        }
    }

    static CONFIG: PluginConfig = PluginConfig::new("Silent").with_vendor("pongasoft");
    static VST2_CONFIG: Vst2Config = Vst2Config::new(fourcc(b"slnt")).with_version(42);

    // An invalid config must still produce an instance.
    static BROKEN_CONFIG: PluginConfig = PluginConfig::new("").with_io(4, 1);
    static BROKEN_VST2_CONFIG: Vst2Config = Vst2Config::new(0);

    export_vst2!(CONFIG, VST2_CONFIG, Silent);

    unsafe fn close(effect: *mut AEffect) {
        ((*effect).dispatcher)(effect, OpCode::Close as i32, 0, 0, ptr::null_mut(), 0.0);
    }

    #[test]
    fn test_exported_entry_point() {
        let effect = VSTPluginMain(None);
        assert!(!effect.is_null());
        unsafe {
            assert_eq!((*effect).unique_id, fourcc(b"slnt"));
            assert_eq!((*effect).version, 42);
            close(effect);
        }
    }

    #[test]
    fn test_invalid_config_still_constructs() {
        let effect = plugin_main::<Silent>(None, &BROKEN_CONFIG, &BROKEN_VST2_CONFIG);
        assert!(!effect.is_null());
        unsafe {
            assert_eq!((*effect).num_inputs, 4);
            assert_eq!((*effect).num_outputs, 1);
            close(effect);
        }
    }
}
