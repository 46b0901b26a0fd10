//! M3dB - stereo attenuator.
//!
//! Halves the amplitude of every input channel. The name promises 3 dB,
//! but a gain of 0.5 is about -6.02 dB; the gain is kept at 0.5.
//!
//! Loaded by a host through the exported `VSTPluginMain` entry point.
//! Every host query other than plug category, vendor string and vendor
//! version is ignored.

use m3db_core::{Buffer, Plugin, PluginConfig, Sample};
use m3db_vst2::{export_vst2, fourcc, PlugCategory, Vst2Config};

// =============================================================================
// Plugin Configuration
// =============================================================================

/// Version reported to the host.
pub const PLUGIN_VERSION: i32 = 1000;

/// Linear gain applied to every sample.
pub const GAIN: f64 = 0.5;

/// Shared plugin configuration (format-agnostic metadata)
pub static CONFIG: PluginConfig = PluginConfig::new("M3dB")
    .with_vendor("pongasoft")
    .with_io(2, 2)
    .with_parameters(0)
    .with_programs(0);

/// VST2-specific configuration
/// 'usan' is registered with Steinberg.
pub static VST2_CONFIG: Vst2Config = Vst2Config::new(fourcc(b"usan"))
    .with_version(PLUGIN_VERSION)
    .with_category(PlugCategory::Effect);

// =============================================================================
// Plugin
// =============================================================================

/// The attenuator. Stateless; no parameters, no programs.
#[derive(Debug, Default)]
pub struct Attenuator;

impl Plugin for Attenuator {
    fn process<S: Sample>(&mut self, buffer: &mut Buffer<'_, S>) {
        buffer.apply_gain(S::from_f64(GAIN));
    }
}

// =============================================================================
// Plugin Export
// =============================================================================

export_vst2!(CONFIG, VST2_CONFIG, Attenuator);

#[cfg(test)]
mod tests {
    use super::*;
    use m3db_vst2::api::{flags, AEffect, OpCode, MAX_VENDOR_STR_LEN, VST_MAGIC};
    use std::ffi::{c_char, c_void};
    use std::ptr;

    unsafe extern "C" fn host(
        _effect: *mut AEffect,
        _opcode: i32,
        _index: i32,
        _value: isize,
        _ptr: *mut c_void,
        _opt: f32,
    ) -> isize {
        0
    }

    unsafe fn dispatch(effect: *mut AEffect, opcode: OpCode, ptr: *mut c_void) -> isize {
        ((*effect).dispatcher)(effect, opcode as i32, 0, 0, ptr, 0.0)
    }

    #[test]
    fn test_configuration_is_valid() {
        assert!(VST2_CONFIG.validate(&CONFIG).is_ok());
    }

    #[test]
    fn test_single_channel_scenario() {
        let input = [1.0f32, -2.0, 0.0];
        let mut output = [0.0f32; 3];

        Attenuator.process(&mut Buffer::from_slices([&input[..]], [&mut output[..]], 3));
        assert_eq!(output, [0.5, -1.0, 0.0]);
    }

    #[test]
    fn test_extreme_values_match_ieee_multiply() {
        let input = [
            f64::MAX,
            f64::MIN,
            f64::MIN_POSITIVE,
            f64::EPSILON,
            -0.0,
            f64::INFINITY,
            5e-324,
        ];
        let mut output = [0.0f64; 7];

        Attenuator.process(&mut Buffer::from_slices([&input[..]], [&mut output[..]], 7));
        for (i, o) in input.iter().zip(output.iter()) {
            assert_eq!(o.to_bits(), (i * 0.5).to_bits());
        }

        let nan = [f32::NAN];
        let mut nan_out = [0.0f32];
        Attenuator.process(&mut Buffer::from_slices([&nan[..]], [&mut nan_out[..]], 1));
        assert!(nan_out[0].is_nan());
    }

    #[test]
    fn test_host_session() {
        let effect = VSTPluginMain(Some(host));
        assert!(!effect.is_null());

        unsafe {
            let e = &*effect;
            assert_eq!(e.magic, VST_MAGIC);
            assert_eq!(e.unique_id, fourcc(b"usan"));
            assert_eq!(e.version, PLUGIN_VERSION);
            assert_eq!((e.num_inputs, e.num_outputs), (2, 2));
            assert_eq!((e.num_params, e.num_programs), (0, 0));
            assert_eq!(e.flags, flags::CAN_REPLACING | flags::CAN_DOUBLE_REPLACING);

            assert_eq!(dispatch(effect, OpCode::Open, ptr::null_mut()), 0);
            assert_eq!(dispatch(effect, OpCode::GetPlugCategory, ptr::null_mut()), 1);
            assert_eq!(dispatch(effect, OpCode::GetVendorVersion, ptr::null_mut()), 1000);

            let mut vendor = [0 as c_char; MAX_VENDOR_STR_LEN];
            assert_eq!(dispatch(effect, OpCode::GetVendorString, vendor.as_mut_ptr().cast()), 1);
            let vendor: Vec<u8> = vendor.iter().take_while(|&&c| c != 0).map(|&c| c as u8).collect();
            assert_eq!(vendor, b"pongasoft");

            assert_eq!(((*effect).get_parameter)(effect, 0), 0.0);
            ((*effect).set_parameter)(effect, 0, 1.0);

            let left = [0.5f32, -1.0];
            let right = [2.0f32, 0.25];
            let mut out_left = [0.0f32; 2];
            let mut out_right = [0.0f32; 2];
            let inputs = [left.as_ptr(), right.as_ptr()];
            let mut outputs = [out_left.as_mut_ptr(), out_right.as_mut_ptr()];
            ((*effect).process_replacing)(effect, inputs.as_ptr(), outputs.as_mut_ptr(), 2);

            let left64 = [8.0f64];
            let right64 = [-8.0f64];
            let mut out_left64 = [0.0f64];
            let mut out_right64 = [0.0f64];
            let inputs64 = [left64.as_ptr(), right64.as_ptr()];
            let mut outputs64 = [out_left64.as_mut_ptr(), out_right64.as_mut_ptr()];
            ((*effect).process_double_replacing)(effect, inputs64.as_ptr(), outputs64.as_mut_ptr(), 1);

            assert_eq!(dispatch(effect, OpCode::Close, ptr::null_mut()), 0);

            assert_eq!(out_left, [0.25, -0.5]);
            assert_eq!(out_right, [1.0, 0.125]);
            assert_eq!(out_left64, [4.0]);
            assert_eq!(out_right64, [-4.0]);
        }
    }
}
