//! 30-bit Morton (Z-order curve) encoding for box centroids.
//!
//! Interleaving the bits of quantized x/y/z coordinates orders points along a
//! space-filling curve, so spatially close centroids tend to get numerically
//! close codes. The builder sorts by these codes to decide which boxes end up
//! as neighbours in the tree.

use crate::aabb::Aabb;
use crate::{Real, Vector3};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Number of buckets per dimension; codes carry 10 bits for each of x, y, z.
pub const MORTON_BUCKETS: u32 = 1 << 10;

/// Expands a 10-bit integer into 30 bits by inserting two zero bits above
/// each data bit.
///
/// E.g. `0b1111111111` becomes `0b001001001001001001001001001001`.
///
/// # Examples
/// ```
/// use lbvh::morton::expand_bits_30;
///
/// assert_eq!(expand_bits_30(0b11), 0b1001);
/// assert_eq!(expand_bits_30(0x3FF), 0x0924_9249);
/// ```
#[inline]
pub fn expand_bits_30(v: u32) -> u32 {
    let mut v = v & 0x3FF;
    v = (v.wrapping_mul(0x0001_0001)) & 0xFF00_00FF;
    v = (v.wrapping_mul(0x0000_0101)) & 0x0F00_F00F;
    v = (v.wrapping_mul(0x0000_0011)) & 0xC30C_30C3;
    v = (v.wrapping_mul(0x0000_0005)) & 0x4924_9249;
    v
}

/// Converts a 3D point into a 30-bit Morton code.
///
/// Each component must lie in `[0, MORTON_BUCKETS)`; values outside that
/// range are silently clamped, so callers must scale their data into it
/// first. Truncation divides each dimension into 1024 unit buckets.
#[inline]
pub fn morton_encode_30(x: Real, y: Real, z: Real) -> u32 {
    // Clamp to [0, 1023]; the upper limit may be fractional since the value
    // is truncated right after. A NaN component clamps to NaN and truncates
    // to bucket 0.
    let max = (MORTON_BUCKETS - 1) as Real;
    let xx = expand_bits_30(x.clamp(0.0, max) as u32);
    let yy = expand_bits_30(y.clamp(0.0, max) as u32);
    let zz = expand_bits_30(z.clamp(0.0, max) as u32);
    (xx << 2) | (yy << 1) | zz
}

/// A Morton code paired with the index of the box it was computed from.
/// Ephemeral: lives only for the sort during construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MortonEntry {
    /// The 30-bit Morton code of the box centroid.
    pub code: u32,

    /// Index of the box in the caller's input slice.
    pub idx: u32,
}

/// Per-axis multiplier taking centroid offsets from the root box into Morton
/// range. Axes with zero (or denormal) extent get multiplier 0 and drop out
/// of the ordering; no non-finite value can escape into the codes.
fn centroid_scale(root: &Aabb) -> Vector3 {
    let size = root.size();
    size.map(|extent| {
        let scale = MORTON_BUCKETS as Real / extent;
        if scale.is_finite() {
            scale
        } else {
            0.0
        }
    })
}

/// Computes the Morton entry list for the given boxes: one `(code, index)`
/// pair per box, with centroids measured relative to `root`. Empty boxes get
/// code 0, as if centered on the minimum corner of `root`.
pub(crate) fn make_entries(boxes: &[Aabb], root: &Aabb) -> Vec<MortonEntry> {
    let scale = centroid_scale(root);
    let min = root.min;

    let encode = |(i, aabb): (usize, &Aabb)| {
        let code = if aabb.is_empty() {
            0
        } else {
            let offset = aabb.center() - min;
            morton_encode_30(
                offset.x * scale.x,
                offset.y * scale.y,
                offset.z * scale.z,
            )
        };
        MortonEntry {
            code,
            idx: i as u32,
        }
    };

    #[cfg(feature = "rayon")]
    let entries = boxes.par_iter().enumerate().map(encode).collect();

    #[cfg(not(feature = "rayon"))]
    let entries = boxes.iter().enumerate().map(encode).collect();

    entries
}
