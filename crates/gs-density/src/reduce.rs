//! Mode-seeking reduction of dense point sets.
//!
//! Raw network node sets contain long runs of near-duplicate coordinates
//! (every bus stop of a corridor, every vertex of a station throat).  Fed
//! directly into the nearest-neighbor proximity term, twenty adjacent bus
//! stops would outweigh one isolated rail station.  The reducer collapses
//! each locally dense group to a single representative center, which also
//! bounds the size of every downstream distance matrix.
//!
//! The algorithm is flat-kernel mean shift in degree space: each point
//! repeatedly moves to the mean of all input points within the bandwidth
//! until it stops moving, and converged positions closer than half a
//! bandwidth are merged.

use gs_core::GeoPoint;
use rstar::RTree;

/// Default spatial bandwidth, in degrees (~1.1 km at mid latitudes).
pub const DEFAULT_REDUCTION_BANDWIDTH_DEG: f64 = 0.01;

/// Shift iterations are capped; in practice convergence takes < 10.
const MAX_SHIFT_ITERATIONS: usize = 50;

/// Collapse `points` to one representative center per density peak.
///
/// Returns an empty vector for empty input.  Output order follows the
/// first input point that converged to each peak, so identical input
/// yields identical output.
pub fn reduce_nodes(points: &[GeoPoint], bandwidth_deg: f64) -> Vec<GeoPoint> {
    if points.is_empty() {
        return Vec::new();
    }

    let tree = RTree::bulk_load(points.iter().map(|p| [p.lat, p.lon]).collect());
    let bw_sq = bandwidth_deg * bandwidth_deg;
    let shift_tol = bandwidth_deg / 1000.0;

    // Shift every point to its local density peak.
    let mut modes = Vec::with_capacity(points.len());
    for p in points {
        let mut pos = [p.lat, p.lon];
        for _ in 0..MAX_SHIFT_ITERATIONS {
            let mut sum = [0.0f64; 2];
            let mut count = 0usize;
            for nb in tree.locate_within_distance(pos, bw_sq) {
                sum[0] += nb[0];
                sum[1] += nb[1];
                count += 1;
            }
            if count == 0 {
                break; // drifted away from all data; keep current position
            }
            let next = [sum[0] / count as f64, sum[1] / count as f64];
            let moved = sq_dist(pos, next).sqrt();
            pos = next;
            if moved < shift_tol {
                break;
            }
        }
        modes.push(pos);
    }

    // Merge converged modes closer than half a bandwidth, keeping the
    // first-seen representative.
    let merge_sq = (bandwidth_deg * 0.5).powi(2);
    let mut centers: Vec<[f64; 2]> = Vec::new();
    for mode in modes {
        if !centers.iter().any(|c| sq_dist(*c, mode) < merge_sq) {
            centers.push(mode);
        }
    }

    centers.into_iter().map(|c| GeoPoint::new(c[0], c[1])).collect()
}

#[inline]
fn sq_dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    d0 * d0 + d1 * d1
}
