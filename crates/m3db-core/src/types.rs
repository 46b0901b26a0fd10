//! Common types used throughout the M3dB crates.

/// Maximum number of audio channels a [`Buffer`](crate::Buffer) can hold.
///
/// Channels beyond this limit are ignored when a buffer is assembled from
/// host data. Configurations declaring more channels fail validation.
pub const MAX_CHANNELS: usize = 32;

/// Index of a plugin parameter as seen by the host.
pub type ParamIndex = usize;
