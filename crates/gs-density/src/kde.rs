//! Weighted two-dimensional Gaussian kernel density estimation.
//!
//! A product (diagonal-bandwidth) Gaussian kernel with per-dimension
//! bandwidths chosen by Scott's rule on the weighted effective sample
//! size:
//!
//! ```text
//! n_eff = (Σw)² / Σw²          h_d = σ_d · n_eff^(−1/6)
//! ```
//!
//! Weights may be signed (the land-use layer mixes attractive and
//! repulsive categories); bandwidth statistics use absolute weights.
//! Every degenerate input — no points, all-zero weights, zero variance in
//! a dimension — produces a well-defined flat or clamped surface rather
//! than NaN.  The caller min-max normalizes afterwards, so the absolute
//! scale of the output is not meaningful.

use gs_core::GeoPoint;

/// Bandwidth floor in degrees.  Applied when the data has (near-)zero
/// variance in a dimension so evaluation never divides by zero.
const MIN_BANDWIDTH_DEG: f64 = 1e-4;

/// A fitted weighted Gaussian KDE over geographic coordinates.
pub struct Kde2 {
    points: Vec<[f64; 2]>,
    weights: Vec<f64>,
    h_lat: f64,
    h_lon: f64,
    /// 1 / (2π · h_lat · h_lon · Σ|w|); zero for a flat (degenerate) fit.
    norm: f64,
}

impl Kde2 {
    /// Fit the estimator to `points` with one weight per point.
    ///
    /// # Panics
    /// Panics if `points` and `weights` differ in length.
    pub fn fit(points: &[GeoPoint], weights: &[f64]) -> Self {
        assert_eq!(points.len(), weights.len(), "one weight per point");

        let abs_sum: f64 = weights.iter().map(|w| w.abs()).sum();
        if points.is_empty() || abs_sum <= 0.0 {
            // Flat surface: evaluate() returns all zeros.
            return Self {
                points: Vec::new(),
                weights: Vec::new(),
                h_lat: MIN_BANDWIDTH_DEG,
                h_lon: MIN_BANDWIDTH_DEG,
                norm: 0.0,
            };
        }

        let (h_lat, h_lon) = scott_bandwidths(points, weights, abs_sum);
        let norm = 1.0 / (std::f64::consts::TAU * h_lat * h_lon * abs_sum);

        Self {
            points: points.iter().map(|p| [p.lat, p.lon]).collect(),
            weights: weights.to_vec(),
            h_lat,
            h_lon,
            norm,
        }
    }

    /// Evaluate the density surface at each coordinate in `at`.
    pub fn evaluate(&self, at: &[GeoPoint]) -> Vec<f64> {
        if self.norm == 0.0 {
            return vec![0.0; at.len()];
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            at.par_iter().map(|p| self.evaluate_one(*p)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        at.iter().map(|p| self.evaluate_one(*p)).collect()
    }

    fn evaluate_one(&self, p: GeoPoint) -> f64 {
        let mut acc = 0.0;
        for (q, &w) in self.points.iter().zip(&self.weights) {
            let z_lat = (p.lat - q[0]) / self.h_lat;
            let z_lon = (p.lon - q[1]) / self.h_lon;
            acc += w * (-0.5 * (z_lat * z_lat + z_lon * z_lon)).exp();
        }
        acc * self.norm
    }
}

/// Per-dimension Scott's-rule bandwidths from the |w|-weighted variance.
fn scott_bandwidths(points: &[GeoPoint], weights: &[f64], abs_sum: f64) -> (f64, f64) {
    let abs_sq_sum: f64 = weights.iter().map(|w| w * w).sum();
    let n_eff = abs_sum * abs_sum / abs_sq_sum;
    // d = 2 dimensions → exponent −1/(d+4) = −1/6.
    let factor = n_eff.powf(-1.0 / 6.0);

    let mut mean = [0.0f64; 2];
    for (p, w) in points.iter().zip(weights) {
        mean[0] += w.abs() * p.lat;
        mean[1] += w.abs() * p.lon;
    }
    mean[0] /= abs_sum;
    mean[1] /= abs_sum;

    let mut var = [0.0f64; 2];
    for (p, w) in points.iter().zip(weights) {
        var[0] += w.abs() * (p.lat - mean[0]).powi(2);
        var[1] += w.abs() * (p.lon - mean[1]).powi(2);
    }
    var[0] /= abs_sum;
    var[1] /= abs_sum;

    let h_lat = (var[0].sqrt() * factor).max(MIN_BANDWIDTH_DEG);
    let h_lon = (var[1].sqrt() * factor).max(MIN_BANDWIDTH_DEG);
    (h_lat, h_lon)
}
