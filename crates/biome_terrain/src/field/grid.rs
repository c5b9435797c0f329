//! Dense scalar grids for elevation and moisture samples.
//!
//! A [`Grid`] stores `width * depth` values in row-major order (`z` rows of `x` cells).
//! Elevation and moisture share the type through the [`ElevationGrid`] and
//! [`MoistureGrid`] aliases.

/// A dense 2D grid of `f32` samples indexed by integer `(x, z)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    depth: usize,
    data: Vec<f32>,
}

/// Normalized terrain heights. Values are intended to lie in `[0, 1]` but may exceed it
/// before and after edge shaping.
pub type ElevationGrid = Grid;

/// Normalized wetness samples in `[0, 1]`.
pub type MoistureGrid = Grid;

impl Grid {
    /// Create a new grid, initializing all values to zero.
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width,
            depth,
            data: vec![0.0; width * depth],
        }
    }

    /// Create a grid by evaluating `f(x, z)` for every cell.
    pub fn from_fn(width: usize, depth: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(width * depth);
        for z in 0..depth {
            for x in 0..width {
                data.push(f(x, z));
            }
        }
        Self { width, depth, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get the size of the grid as `(width, depth)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, x: usize, z: usize) -> usize {
        debug_assert!(x < self.width && z < self.depth, "cell ({x}, {z}) out of bounds");
        z * self.width + x
    }

    /// Get the value at `(x, z)`. Panics in debug builds when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.data[self.index(x, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, z: usize, value: f32) {
        let i = self.index(x, z);
        self.data[i] = value;
    }

    /// Row-major view of all samples.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Iterate over `(x, z, value)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let w = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % w, i / w, *v))
    }

    /// Bilinearly sample at continuous cell coordinates, clamping to the border.
    pub fn sample_bilinear(&self, x: f32, z: f32) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let max_x = (self.width - 1) as f32;
        let max_z = (self.depth - 1) as f32;
        let x = x.clamp(0.0, max_x);
        let z = z.clamp(0.0, max_z);

        let x0 = x.floor() as usize;
        let z0 = z.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let z1 = (z0 + 1).min(self.depth - 1);
        let tx = x - x0 as f32;
        let tz = z - z0 as f32;

        let a = self.get(x0, z0) + (self.get(x1, z0) - self.get(x0, z0)) * tx;
        let b = self.get(x0, z1) + (self.get(x1, z1) - self.get(x0, z1)) * tx;
        a + (b - a) * tz
    }

    /// Smallest and largest sample, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data.iter().copied().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_initializes_with_zeroes() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.size(), (3, 2));
        assert!(grid.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = Grid::from_fn(3, 2, |x, z| (z * 10 + x) as f32);
        assert_eq!(grid.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(grid.get(2, 1), 12.0);
    }

    #[test]
    fn bilinear_interpolates_between_cells() {
        let grid = Grid::from_fn(2, 2, |x, _| x as f32);
        assert!((grid.sample_bilinear(0.5, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(grid.sample_bilinear(-3.0, 0.0), 0.0);
        assert_eq!(grid.sample_bilinear(7.0, 0.0), 1.0);
    }

    #[test]
    fn iter_cells_reports_coordinates() {
        let grid = Grid::from_fn(2, 2, |x, z| (x * 2 + z) as f32);
        let cells: Vec<_> = grid.iter_cells().collect();
        assert_eq!(cells[1], (1, 0, 2.0));
        assert_eq!(cells[2], (0, 1, 1.0));
    }

    #[test]
    fn min_max_spans_samples() {
        let grid = Grid::from_fn(3, 1, |x, _| x as f32 - 1.0);
        assert_eq!(grid.min_max(), Some((-1.0, 1.0)));
        assert_eq!(Grid::new(0, 0).min_max(), None);
    }
}
