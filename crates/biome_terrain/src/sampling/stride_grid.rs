//! Coarse fixed-stride grid walk.
//!
//! Visits `margin, margin + stride, ...` on each axis while staying strictly below
//! `extent - margin`, so a border of `margin` cells is skipped on every side.

/// Fixed-stride grid over integer cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrideGrid {
    /// Distance between sample points in cells.
    pub stride: usize,
    /// Cells skipped along each border.
    pub margin: usize,
}

impl StrideGrid {
    /// Create a grid whose border margin equals its stride.
    pub fn new(stride: usize) -> Self {
        Self {
            stride: stride.max(1),
            margin: stride,
        }
    }

    fn axis(&self, extent: usize) -> impl Iterator<Item = usize> {
        let end = extent.saturating_sub(self.margin);
        (self.margin..end).step_by(self.stride.max(1))
    }

    /// Number of points on an axis of `extent` cells.
    pub fn axis_len(&self, extent: usize) -> usize {
        self.axis(extent).count()
    }

    /// Sample points `(x, z)` with `x` as the outer loop.
    pub fn points(&self, width: usize, depth: usize) -> Vec<(usize, usize)> {
        let mut points = Vec::with_capacity(self.axis_len(width) * self.axis_len(depth));
        for x in self.axis(width) {
            for z in self.axis(depth) {
                points.push((x, z));
            }
        }
        points
    }
}
