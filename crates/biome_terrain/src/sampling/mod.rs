//! Randomness helpers and grid walks used by the scatter passes.
//!
//! Every random decision is drawn from a generator seeded per cell and per pass with
//! [`seed_for_cell`], so the outcome of a pass does not depend on iteration order.
use rand::RngCore;

pub mod seed;
pub mod stride_grid;

pub use seed::{cell_rng, seed_for_cell, StageTag};
pub use stride_grid::StrideGrid;

/// Generate a random float in the range [0, 1) from the upper 24 bits of a draw.
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Uniform integer in `[lo, hi)`. Returns `lo` when the range is empty.
#[inline]
pub fn range_i32(rng: &mut dyn RngCore, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        return lo;
    }
    let span = (hi as i64 - lo as i64) as u64;
    lo + ((rng.next_u32() as u64 * span) >> 32) as i32
}

/// Uniform float in `[lo, hi)`.
#[inline]
pub fn range_f32(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    let v = lo + rand01(rng) * (hi - lo);
    // Rounding can land exactly on `hi` for large spans.
    if v >= hi && hi > lo {
        next_down(hi)
    } else {
        v
    }
}

/// Uniform index into a collection of `len` items, or `None` if it is empty.
#[inline]
pub fn pick_index(rng: &mut dyn RngCore, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(((rng.next_u32() as u64 * len as u64) >> 32) as usize)
}

/// Compute the next smaller representable float value.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}
