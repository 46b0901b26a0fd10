//! String utilities for VST2 host buffers.
//!
//! Hosts hand the plugin fixed-size `char` arrays to fill. These helpers
//! never write past the end of such an array.

use std::ffi::c_char;

/// Copy a Rust string into a C-string buffer.
///
/// Copies at most `dst.len() - 1` bytes, stopping early at an interior
/// NUL, and always NUL terminates. Bytes after the terminator are left
/// untouched. Returns the number of bytes copied, excluding the
/// terminator. An empty `dst` is left alone.
pub fn copy_cstring(src: &str, dst: &mut [c_char]) -> usize {
    let Some(capacity) = dst.len().checked_sub(1) else {
        return 0;
    };

    let bytes = src.as_bytes();
    let len = bytes
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(bytes.len())
        .min(capacity);

    for (dst, src) in dst.iter_mut().zip(&bytes[..len]) {
        *dst = *src as c_char;
    }
    dst[len] = 0;

    len
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: c_char = 0x7f;

    fn as_bytes(buf: &[c_char]) -> Vec<u8> {
        buf.iter().map(|&c| c as u8).collect()
    }

    #[test]
    fn test_copy_fits() {
        let mut buf = [SENTINEL; 16];
        assert_eq!(copy_cstring("pongasoft", &mut buf), 9);
        assert_eq!(&as_bytes(&buf)[..10], b"pongasoft\0");
        assert!(buf[10..].iter().all(|&c| c == SENTINEL));
    }

    #[test]
    fn test_copy_truncates_for_every_bound() {
        let src = "pongasoft";
        for max in 1..=src.len() + 2 {
            let mut buf = vec![SENTINEL; max + 4];
            let copied = copy_cstring(src, &mut buf[..max]);

            assert_eq!(copied, src.len().min(max - 1));
            assert_eq!(&as_bytes(&buf)[..copied], &src.as_bytes()[..copied]);
            assert_eq!(buf[copied], 0);
            // Nothing beyond the bound is touched
            assert!(buf[max..].iter().all(|&c| c == SENTINEL));
        }
    }

    #[test]
    fn test_copy_into_empty_buffer() {
        let mut buf: [c_char; 0] = [];
        assert_eq!(copy_cstring("pongasoft", &mut buf), 0);
    }

    #[test]
    fn test_copy_stops_at_interior_nul() {
        let mut buf = [SENTINEL; 8];
        assert_eq!(copy_cstring("ab\0cd", &mut buf), 2);
        assert_eq!(&as_bytes(&buf)[..3], b"ab\0");
        assert_eq!(buf[3], SENTINEL);
    }
}
