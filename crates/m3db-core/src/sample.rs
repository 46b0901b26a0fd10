//! Sample type abstraction for f32/f64 audio processing.
//!
//! Lets one generic processing routine serve both the single- and the
//! double-precision host callbacks through monomorphization.

use std::ops::{Add, Mul, Sub};

/// Trait for audio sample types (f32, f64).
///
/// All methods are inlined so the generic code compiles down to the same
/// loop a hand-written `f32` or `f64` version would produce.
///
/// # Example: Generic Attenuator
///
/// ```ignore
/// fn process<S: Sample>(&mut self, buffer: &mut Buffer<S>) {
///     buffer.apply_gain(S::from_f64(0.5));
/// }
/// ```
pub trait Sample:
    Copy
    + Default
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + PartialOrd
{
    /// Zero value (0.0).
    const ZERO: Self;

    /// Unit value (1.0).
    const ONE: Self;

    /// Convert from f32.
    fn from_f32(value: f32) -> Self;

    /// Convert to f32.
    fn to_f32(self) -> f32;

    /// Convert from f64.
    fn from_f64(value: f64) -> Self;

    /// Convert to f64.
    fn to_f64(self) -> f64;
}

impl Sample for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline(always)]
    fn from_f32(value: f32) -> Self {
        value
    }

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline(always)]
    fn from_f32(value: f32) -> Self {
        value as f64
    }

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_is_exact_in_both_widths() {
        assert_eq!(f32::from_f64(0.5), 0.5f32);
        assert_eq!(f64::from_f32(0.5), 0.5f64);
    }

    #[test]
    fn test_constants() {
        assert_eq!(<f32 as Sample>::ZERO, 0.0);
        assert_eq!(<f64 as Sample>::ONE, 1.0);
    }

    #[test]
    fn test_round_trip_through_other_width() {
        let value = 0.125f32;
        assert_eq!(f32::from_f64(value.to_f64()), value);
        assert_eq!(1.5f64.to_f32(), 1.5f32);
    }
}
