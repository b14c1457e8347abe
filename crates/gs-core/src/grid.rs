//! The fixed analysis lattice.
//!
//! The grid is a square, row-major lattice of coordinates spanning a fixed
//! angular window around the query center.  The window is ±`buffer_deg`
//! regardless of the query radius: the radius only controls the mask
//! applied *after* density estimation, while the lattice itself always
//! covers the same angular extent so cell spacing (and therefore kernel
//! bandwidths and clustering radii expressed in degrees) stay comparable
//! across queries.

use crate::GeoPoint;

/// Lattice parameters.  The defaults reproduce the reference analysis:
/// 100×100 cells over a ±0.17° window.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    /// Cells per axis; the grid has `resolution²` cells total.
    pub resolution: usize,
    /// Half-width of the angular window, in degrees.  Fixed — NOT derived
    /// from the query radius.
    pub buffer_deg: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { resolution: 100, buffer_deg: 0.17 }
    }
}

/// An immutable, row-major lattice of grid-cell coordinates.
///
/// Cell `r * resolution + c` sits at the `r`-th latitude step (south to
/// north) and the `c`-th longitude step (west to east).  The ordering is
/// deterministic, which downstream clustering tests rely on.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: Vec<GeoPoint>,
    resolution: usize,
}

impl Grid {
    /// Build the lattice centered on `center`.
    pub fn build(center: GeoPoint, spec: &GridSpec) -> Self {
        let lats = linspace(
            center.lat - spec.buffer_deg,
            center.lat + spec.buffer_deg,
            spec.resolution,
        );
        let lons = linspace(
            center.lon - spec.buffer_deg,
            center.lon + spec.buffer_deg,
            spec.resolution,
        );

        let mut cells = Vec::with_capacity(spec.resolution * spec.resolution);
        for &lat in &lats {
            for &lon in &lons {
                cells.push(GeoPoint::new(lat, lon));
            }
        }

        Self { cells, resolution: spec.resolution }
    }

    pub fn cells(&self) -> &[GeoPoint] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }
}

/// `n` evenly spaced values from `start` to `stop`, endpoints inclusive.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
