//! The plugin trait implemented by every concrete M3dB plugin.

use crate::buffer::Buffer;
use crate::sample::Sample;
use crate::types::ParamIndex;

/// Behaviour a concrete plugin provides to a format wrapper.
///
/// The wrapper owns one value of the implementing type per host instance
/// and calls into it from the host's callbacks. The host guarantees that
/// calls into one instance never overlap, hence `&mut self`.
///
/// # Real-Time Safety
///
/// [`process`](Plugin::process) runs on the host's audio thread. It must
/// not allocate, lock, or log.
///
/// # Example
///
/// ```ignore
/// #[derive(Default)]
/// struct Mute;
///
/// impl Plugin for Mute {
///     fn process<S: Sample>(&mut self, buffer: &mut Buffer<S>) {
///         buffer.apply_gain(S::ZERO);
///     }
/// }
/// ```
pub trait Plugin: Send + 'static {
    /// Render one block of audio.
    ///
    /// Called for both single- and double-precision host buffers.
    fn process<S: Sample>(&mut self, buffer: &mut Buffer<'_, S>);

    /// Current normalized value of a parameter.
    ///
    /// The default returns 0.0 for every index.
    fn get_parameter(&self, index: ParamIndex) -> f32 {
        let _ = index;
        0.0
    }

    /// Set the normalized value of a parameter.
    ///
    /// The default ignores the call.
    fn set_parameter(&mut self, index: ParamIndex, value: f32) {
        let _ = (index, value);
    }
}
