//! Slope measurement over a heightfield.
//!
//! Steepness is the angle in degrees between the surface normal and the up axis, derived
//! from central differences of the normalized heights scaled to world units. Border cells
//! fall back to one-sided differences.
use super::grid::Grid;

/// World-space scale of a heightfield: horizontal spacing between samples on each axis
/// and the vertical extent a normalized height of `1.0` maps to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightfieldScale {
    pub cell_size_x: f32,
    pub cell_size_z: f32,
    pub max_height: f32,
}

impl HeightfieldScale {
    pub fn new(cell_size_x: f32, cell_size_z: f32, max_height: f32) -> Self {
        Self {
            cell_size_x,
            cell_size_z,
            max_height,
        }
    }
}

/// Gradient `(dh/dx, dh/dz)` in world units at `(x, z)`.
pub fn gradient(heights: &Grid, scale: HeightfieldScale, x: usize, z: usize) -> (f32, f32) {
    let (w, d) = heights.size();
    if w == 0 || d == 0 {
        return (0.0, 0.0);
    }

    let axis = |lo: usize, hi: usize, a: f32, b: f32, spacing: f32| {
        let span = (hi - lo) as f32 * spacing;
        if span > 0.0 {
            (b - a) * scale.max_height / span
        } else {
            0.0
        }
    };

    let x0 = x.saturating_sub(1);
    let x1 = (x + 1).min(w - 1);
    let z0 = z.saturating_sub(1);
    let z1 = (z + 1).min(d - 1);

    let gx = axis(
        x0,
        x1,
        heights.get(x0, z),
        heights.get(x1, z),
        scale.cell_size_x,
    );
    let gz = axis(
        z0,
        z1,
        heights.get(x, z0),
        heights.get(x, z1),
        scale.cell_size_z,
    );
    (gx, gz)
}

/// Steepness in degrees `[0, 90)` at grid cell `(x, z)`.
pub fn steepness_degrees(heights: &Grid, scale: HeightfieldScale, x: usize, z: usize) -> f32 {
    let (gx, gz) = gradient(heights, scale, x, z);
    (gx * gx + gz * gz).sqrt().atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_scale() -> HeightfieldScale {
        HeightfieldScale::new(1.0, 1.0, 1.0)
    }

    #[test]
    fn flat_field_has_zero_steepness() {
        let grid = Grid::from_fn(4, 4, |_, _| 0.5);
        for z in 0..4 {
            for x in 0..4 {
                assert_eq!(steepness_degrees(&grid, unit_scale(), x, z), 0.0);
            }
        }
    }

    #[test]
    fn unit_ramp_is_forty_five_degrees() {
        let grid = Grid::from_fn(5, 5, |x, _| x as f32);
        let s = steepness_degrees(&grid, unit_scale(), 2, 2);
        assert!((s - 45.0).abs() < 1e-4, "got {s}");
    }

    #[test]
    fn border_cells_use_one_sided_differences() {
        let grid = Grid::from_fn(3, 3, |_, z| z as f32);
        let s = steepness_degrees(&grid, unit_scale(), 1, 0);
        assert!((s - 45.0).abs() < 1e-4, "got {s}");
    }

    #[test]
    fn max_height_scales_gradient() {
        let grid = Grid::from_fn(3, 3, |x, _| x as f32 * 0.1);
        let low = steepness_degrees(&grid, HeightfieldScale::new(1.0, 1.0, 1.0), 1, 1);
        let high = steepness_degrees(&grid, HeightfieldScale::new(1.0, 1.0, 20.0), 1, 1);
        assert!(high > low);
    }

    #[test]
    fn single_cell_grid_is_flat() {
        let grid = Grid::from_fn(1, 1, |_, _| 0.9);
        assert_eq!(gradient(&grid, unit_scale(), 0, 0), (0.0, 0.0));
    }
}
