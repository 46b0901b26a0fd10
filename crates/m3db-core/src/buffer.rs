//! Audio buffer abstraction for plugin processing.
//!
//! A [`Buffer`] pairs each input channel with its output channel. Hosts
//! are allowed to hand the same memory to a plugin as both input and
//! output of a channel; such a channel is represented as a single
//! [`Channel::InPlace`] slice so no `&[S]`/`&mut [S]` pair ever aliases.
//!
//! # Real-Time Safety
//!
//! Buffers use fixed-size stack storage. No heap allocations occur during
//! construction or use.
//!
//! # Example
//!
//! ```ignore
//! fn process<S: Sample>(&mut self, buffer: &mut Buffer<S>) {
//!     for channel in buffer.channels_mut() {
//!         channel.map(|sample| sample * S::from_f64(0.5));
//!     }
//! }
//! ```

use crate::sample::Sample;
use crate::types::MAX_CHANNELS;

// =============================================================================
// Channel
// =============================================================================

/// One channel of a processing block.
#[derive(Debug)]
pub enum Channel<'a, S: Sample = f32> {
    /// Input and output live in distinct memory.
    Separate {
        input: &'a [S],
        output: &'a mut [S],
    },
    /// The host passed the same memory as input and output.
    InPlace(&'a mut [S]),
}

impl<'a, S: Sample> Channel<'a, S> {
    /// Input samples of this channel.
    #[inline]
    pub fn input(&self) -> &[S] {
        match self {
            Self::Separate { input, .. } => &input[..],
            Self::InPlace(samples) => &samples[..],
        }
    }

    /// Output samples of this channel.
    ///
    /// For an in-place channel this is the same memory as [`Self::input`].
    #[inline]
    pub fn output(&mut self) -> &mut [S] {
        match self {
            Self::Separate { output, .. } => &mut output[..],
            Self::InPlace(samples) => &mut samples[..],
        }
    }

    /// Returns true if input and output share memory.
    #[inline]
    pub fn is_in_place(&self) -> bool {
        matches!(self, Self::InPlace(_))
    }

    /// Write `f(input[i])` to `output[i]` for every sample.
    ///
    /// When the two sides differ in length only the common prefix is written.
    #[inline]
    pub fn map(&mut self, f: impl Fn(S) -> S) {
        match self {
            Self::Separate { input, output } => {
                for (o, i) in output.iter_mut().zip(input.iter()) {
                    *o = f(*i);
                }
            }
            Self::InPlace(samples) => {
                for sample in samples.iter_mut() {
                    *sample = f(*sample);
                }
            }
        }
    }
}

// =============================================================================
// Buffer
// =============================================================================

/// Audio buffer for one processing block.
///
/// # Type Parameter
///
/// `S` is the sample type, defaulting to `f32`. Use `Buffer<f64>` for
/// double precision processing.
///
/// # Lifetime
///
/// The `'a` lifetime ties the buffer to the host's audio data. Buffers are
/// only valid within a single process call.
pub struct Buffer<'a, S: Sample = f32> {
    channels: [Option<Channel<'a, S>>; MAX_CHANNELS],
    num_channels: usize,
    num_samples: usize,
}

impl<'a, S: Sample> Buffer<'a, S> {
    /// Create a buffer from already paired channels.
    ///
    /// This is called by the format wrapper, not by plugin code.
    /// Channels beyond [`MAX_CHANNELS`] are silently ignored.
    #[inline]
    pub fn new(channels: impl IntoIterator<Item = Channel<'a, S>>, num_samples: usize) -> Self {
        // Can't use [None; N] because Channel holds &mut and is not Copy
        let mut slots: [Option<Channel<'a, S>>; MAX_CHANNELS] = std::array::from_fn(|_| None);
        let mut num_channels = 0;
        for (slot, channel) in slots.iter_mut().zip(channels) {
            *slot = Some(channel);
            num_channels += 1;
        }

        Self {
            channels: slots,
            num_channels,
            num_samples,
        }
    }

    /// Create a buffer from separate input and output slices.
    ///
    /// Inputs and outputs are paired by index; only channels present on
    /// both sides are kept.
    pub fn from_slices(
        inputs: impl IntoIterator<Item = &'a [S]>,
        outputs: impl IntoIterator<Item = &'a mut [S]>,
        num_samples: usize,
    ) -> Self {
        Self::new(
            inputs
                .into_iter()
                .zip(outputs)
                .map(|(input, output)| Channel::Separate { input, output }),
            num_samples,
        )
    }

    /// Number of samples in this processing block.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Number of channels in this processing block.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Returns true if there is nothing to process.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_channels == 0 || self.num_samples == 0
    }

    /// Get a channel by index.
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut Channel<'a, S>> {
        self.channels[..self.num_channels]
            .get_mut(index)
            .and_then(|slot| slot.as_mut())
    }

    /// Iterate over all channels mutably.
    #[inline]
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut Channel<'a, S>> + '_ {
        self.channels[..self.num_channels]
            .iter_mut()
            .filter_map(|slot| slot.as_mut())
    }

    /// Write `input * gain` to the output of every channel.
    #[inline]
    pub fn apply_gain(&mut self, gain: S) {
        for channel in self.channels_mut() {
            channel.map(|sample| sample * gain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slices_pairs_channels() {
        let left = [1.0f32, 2.0];
        let right = [3.0f32, 4.0];
        let mut out_left = [0.0f32; 2];
        let mut out_right = [0.0f32; 2];

        let mut buffer = Buffer::from_slices(
            [&left[..], &right[..]],
            [&mut out_left[..], &mut out_right[..]],
            2,
        );

        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.num_samples(), 2);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.channel_mut(1).map(|ch| ch.input().to_vec()), Some(vec![3.0, 4.0]));
        assert!(buffer.channel_mut(2).is_none());
    }

    #[test]
    fn test_from_slices_drops_unpaired_inputs() {
        let a = [1.0f64];
        let b = [2.0f64];
        let mut out = [0.0f64];

        let buffer = Buffer::from_slices([&a[..], &b[..]], [&mut out[..]], 1);
        assert_eq!(buffer.num_channels(), 1);
    }

    #[test]
    fn test_apply_gain_separate() {
        let input = [1.0f32, -2.0, 0.0];
        let mut output = [9.0f32; 3];

        {
            let mut buffer = Buffer::from_slices([&input[..]], [&mut output[..]], 3);
            buffer.apply_gain(0.5);
        }

        assert_eq!(output, [0.5, -1.0, 0.0]);
        assert_eq!(input, [1.0, -2.0, 0.0]);
    }

    #[test]
    fn test_apply_gain_in_place() {
        let mut samples = [4.0f64, -8.0];

        {
            let mut buffer = Buffer::new([Channel::InPlace(&mut samples[..])], 2);
            assert!(buffer.channel_mut(0).is_some_and(|ch| ch.is_in_place()));
            buffer.apply_gain(0.5);
        }

        assert_eq!(samples, [2.0, -4.0]);
    }

    #[test]
    fn test_empty_buffer_is_noop() {
        let mut buffer: Buffer<'_, f32> = Buffer::new(std::iter::empty(), 0);
        assert!(buffer.is_empty());
        buffer.apply_gain(0.5);
        assert_eq!(buffer.channels_mut().count(), 0);
    }

    #[test]
    fn test_channels_beyond_max_are_ignored() {
        let inputs = vec![[1.0f32]; MAX_CHANNELS + 4];
        let mut outputs = vec![[0.0f32]; MAX_CHANNELS + 4];

        let buffer = Buffer::from_slices(
            inputs.iter().map(|ch| &ch[..]),
            outputs.iter_mut().map(|ch| &mut ch[..]),
            1,
        );
        assert_eq!(buffer.num_channels(), MAX_CHANNELS);
    }

    #[test]
    fn test_map_writes_common_prefix_only() {
        let input = [1.0f32, 1.0, 1.0];
        let mut output = [0.0f32; 2];

        let mut channel = Channel::Separate {
            input: &input[..],
            output: &mut output[..],
        };
        channel.map(|s| s * 2.0);
        assert_eq!(channel.output(), &[2.0, 2.0]);
    }
}
