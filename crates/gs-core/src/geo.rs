//! Geographic coordinate type and batched great-circle distances.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  The analysis lattice is at
//! most a few tens of thousands of cells, so memory is irrelevant, and the
//! kernel-density and normalization math downstream is sensitive to
//! cancellation — double precision throughout keeps that simple.

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Mean Earth radius in kilometres, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Satisfies `distance_km(x, x) == 0` and symmetry in its arguments.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }

    /// Approximate bounding-box check — much cheaper than `distance_km` for
    /// quick rejection before an exact distance test.
    #[inline]
    pub fn within_bbox(self, center: GeoPoint, half_deg: f64) -> bool {
        (self.lat - center.lat).abs() <= half_deg
            && (self.lon - center.lon).abs() <= half_deg
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── DistanceMatrix ────────────────────────────────────────────────────────────

/// Batched M×N haversine distances between two coordinate sets, stored as a
/// flat row-major `Vec<f64>`.
///
/// Every density layer needs nearest-neighbor distances from the full grid
/// to a point set, so the many-to-many form is the primitive and the
/// pairwise case is just a 1×1 matrix.  With the `parallel` feature rows
/// are computed on Rayon's thread pool; each row is independent, so the
/// result is bit-identical either way.
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all distances from each point in `from` to each point in `to`.
    pub fn between(from: &[GeoPoint], to: &[GeoPoint]) -> Self {
        let rows = from.len();
        let cols = to.len();
        if rows == 0 || cols == 0 {
            return Self { rows, cols, data: Vec::new() };
        }

        let mut data = vec![0.0; rows * cols];

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            data.par_chunks_mut(cols)
                .zip(from.par_iter())
                .for_each(|(row, &p)| Self::fill_row(p, to, row));
        }

        #[cfg(not(feature = "parallel"))]
        for (row, &p) in data.chunks_mut(cols).zip(from.iter()) {
            Self::fill_row(p, to, row);
        }

        Self { rows, cols, data }
    }

    fn fill_row(p: GeoPoint, to: &[GeoPoint], row: &mut [f64]) {
        for (slot, &q) in row.iter_mut().zip(to.iter()) {
            *slot = p.distance_km(q);
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance from `from[i]` to `to[j]` in kilometres.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// All distances from `from[i]`, as a contiguous slice of length `cols`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Nearest-neighbor distance per row: `min_j distance(from[i], to[j])`.
    ///
    /// When `to` is empty there is no neighbor, and every entry is
    /// `f64::INFINITY` — callers treat that as a zero proximity
    /// contribution, not an error.
    pub fn min_per_row(&self) -> Vec<f64> {
        (0..self.rows)
            .map(|i| {
                if self.cols == 0 {
                    f64::INFINITY
                } else {
                    self.row(i).iter().copied().fold(f64::INFINITY, f64::min)
                }
            })
            .collect()
    }
}
