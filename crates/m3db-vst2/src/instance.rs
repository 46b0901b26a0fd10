//! Generic VST2 plugin instance.
//!
//! [`Vst2Instance`] owns the [`AEffect`] descriptor handed to the host
//! together with the concrete [`Plugin`]. The descriptor's `object` field
//! points back at the owning instance; every callback resolves it with a
//! single cast before doing anything else.
//!
//! ```text
//! host ──VSTPluginMain──► Vst2Instance::<P>::create ──► *mut AEffect
//!        dispatcher / process_replacing / ...
//!          └─► AEffect::object ─► Vst2Instance<P> ─► P
//! ```
//!
//! # Lifecycle
//!
//! The instance is boxed and leaked to the host in [`Vst2Instance::create`].
//! It is reclaimed exactly once, when the dispatcher receives
//! [`OpCode::Close`]. The host must not call into the descriptor after
//! that; a second close is a use after free and is not detected.

use std::ffi::{c_char, c_void};
use std::{ptr, slice};

use m3db_core::{Buffer, Channel, Plugin, PluginConfig, Sample};

use crate::api::{flags, AEffect, HostCallbackProc, OpCode, MAX_VENDOR_STR_LEN};
use crate::config::Vst2Config;
use crate::util::copy_cstring;

/// Plugin side of one host-loaded instance.
pub struct Vst2Instance<P: Plugin> {
    effect: AEffect,
    host_callback: Option<HostCallbackProc>,
    config: &'static PluginConfig,
    vst2_config: &'static Vst2Config,
    plugin: P,
}

impl<P: Plugin> Vst2Instance<P> {
    /// Allocate an instance and return its descriptor.
    ///
    /// Ownership passes to the host, which releases it with
    /// [`OpCode::Close`]. Never returns null.
    pub fn create(
        host_callback: Option<HostCallbackProc>,
        config: &'static PluginConfig,
        vst2_config: &'static Vst2Config,
        plugin: P,
    ) -> *mut AEffect {
        let mut effect = AEffect::new(
            Self::dispatch,
            Self::get_parameter,
            Self::set_parameter,
            Self::process_replacing::<f32>,
            Self::process_replacing::<f64>,
        );
        effect.flags = flags::CAN_REPLACING | flags::CAN_DOUBLE_REPLACING;
        effect.unique_id = vst2_config.unique_id;
        effect.version = vst2_config.version;
        // Counts are bounded by Vst2Config::validate
        effect.num_params = config.num_parameters as i32;
        effect.num_programs = config.num_programs as i32;
        effect.num_inputs = config.num_inputs as i32;
        effect.num_outputs = config.num_outputs as i32;

        let instance = Box::into_raw(Box::new(Self {
            effect,
            host_callback,
            config,
            vst2_config,
            plugin,
        }));

        // SAFETY: `instance` was just produced by Box::into_raw and is valid.
        unsafe {
            (*instance).effect.object = instance.cast();
            ptr::addr_of_mut!((*instance).effect)
        }
    }

    /// The descriptor handed to the host.
    pub fn effect(&self) -> &AEffect {
        &self.effect
    }

    /// The callback the host passed to the entry point.
    pub fn host_callback(&self) -> Option<HostCallbackProc> {
        self.host_callback
    }

    /// The wrapped plugin.
    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    /// Resolve the instance behind a descriptor.
    ///
    /// # Safety
    ///
    /// `effect` must be null or a descriptor returned by [`Self::create`]
    /// for this `P` that has not been closed yet.
    unsafe fn instance_ptr(effect: *mut AEffect) -> *mut Self {
        if effect.is_null() {
            return ptr::null_mut();
        }
        (*effect).object.cast()
    }

    /// # Safety
    ///
    /// Same contract as [`Self::instance_ptr`]; no other reference to the
    /// instance may be live.
    unsafe fn from_effect<'a>(effect: *mut AEffect) -> Option<&'a mut Self> {
        Self::instance_ptr(effect).as_mut()
    }

    // =========================================================================
    // Host callbacks
    // =========================================================================

    /// Host-to-plugin command entry.
    ///
    /// After [`OpCode::Close`] the descriptor is dangling. Calling this
    /// again on it, including a second close, is undefined behaviour.
    unsafe extern "C" fn dispatch(
        effect: *mut AEffect,
        opcode: i32,
        index: i32,
        value: isize,
        ptr: *mut c_void,
        opt: f32,
    ) -> isize {
        log::debug!("dispatch(opcode = {})", opcode);

        let instance = Self::instance_ptr(effect);
        if instance.is_null() {
            return 0;
        }

        match OpCode::try_from(opcode) {
            Ok(OpCode::Close) => {
                log::debug!("closing instance");
                // SAFETY: allocated by Box::into_raw in create(); the host
                // makes close the last call on this descriptor.
                drop(Box::from_raw(instance));
                0
            }
            Ok(opcode) => (*instance).handle(opcode, index, value, ptr, opt),
            Err(code) => {
                log::debug!("unknown opcode {} [ignored]", code);
                0
            }
        }
    }

    /// Answer the commands this wrapper implements; everything else is 0.
    unsafe fn handle(
        &mut self,
        opcode: OpCode,
        _index: i32,
        _value: isize,
        ptr: *mut c_void,
        _opt: f32,
    ) -> isize {
        match opcode {
            OpCode::GetPlugCategory => self.vst2_config.category as isize,
            OpCode::GetVendorString => {
                if ptr.is_null() {
                    return 0;
                }
                let dst = slice::from_raw_parts_mut(ptr.cast::<c_char>(), MAX_VENDOR_STR_LEN);
                copy_cstring(self.config.vendor, dst);
                1
            }
            OpCode::GetVendorVersion => self.vst2_config.version as isize,
            other => {
                log::debug!("opcode {:?} [ignored]", other);
                0
            }
        }
    }

    unsafe extern "C" fn get_parameter(effect: *mut AEffect, index: i32) -> f32 {
        log::debug!("get_parameter({})", index);

        match (Self::from_effect(effect), usize::try_from(index)) {
            (Some(instance), Ok(index)) => instance.plugin.get_parameter(index),
            _ => 0.0,
        }
    }

    unsafe extern "C" fn set_parameter(effect: *mut AEffect, index: i32, value: f32) {
        log::debug!("set_parameter({}, {})", index, value);

        if let (Some(instance), Ok(index)) = (Self::from_effect(effect), usize::try_from(index)) {
            instance.plugin.set_parameter(index, value);
        }
    }

    /// Audio callback for both sample widths.
    ///
    /// Runs on the host's audio thread: no allocation, no locking, no logging.
    unsafe extern "C" fn process_replacing<S: Sample>(
        effect: *mut AEffect,
        inputs: *const *const S,
        outputs: *mut *mut S,
        sample_frames: i32,
    ) {
        let Some(instance) = Self::from_effect(effect) else {
            return;
        };

        let num_channels = instance.effect.num_inputs;
        if let Some(mut buffer) = host_buffer(inputs, outputs, num_channels, sample_frames) {
            instance.plugin.process(&mut buffer);
        }
    }
}

/// Assemble a [`Buffer`] over the host's channel arrays.
///
/// Returns `None` when there is nothing to process: no frames, no
/// channels, or null channel arrays. Channels whose input and output
/// pointers are equal become [`Channel::InPlace`]; null channel pointers
/// are skipped.
///
/// # Safety
///
/// When non-null, `inputs` and `outputs` must each point to at least
/// `num_channels` channel pointers, each valid for `sample_frames`
/// samples, and distinct channels must not overlap.
unsafe fn host_buffer<'a, S: Sample>(
    inputs: *const *const S,
    outputs: *mut *mut S,
    num_channels: i32,
    sample_frames: i32,
) -> Option<Buffer<'a, S>> {
    let num_samples = usize::try_from(sample_frames).ok().filter(|&n| n > 0)?;
    let num_channels = usize::try_from(num_channels).ok().filter(|&n| n > 0)?;
    if inputs.is_null() || outputs.is_null() {
        return None;
    }

    let input_ptrs = slice::from_raw_parts(inputs, num_channels);
    let output_ptrs = slice::from_raw_parts(outputs.cast_const(), num_channels);

    let channels = input_ptrs
        .iter()
        .zip(output_ptrs)
        .filter_map(move |(&input, &output)| {
            if input.is_null() || output.is_null() {
                None
            } else if ptr::eq(input, output) {
                Some(Channel::InPlace(slice::from_raw_parts_mut(output, num_samples)))
            } else {
                Some(Channel::Separate {
                    input: slice::from_raw_parts(input, num_samples),
                    output: slice::from_raw_parts_mut(output, num_samples),
                })
            }
        });

    Some(Buffer::new(channels, num_samples))
}
