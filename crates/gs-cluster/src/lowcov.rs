//! Low-coverage region detection.
//!
//! Selects the grid cells whose combined density falls below a percentile
//! threshold, clusters them with DBSCAN, and returns one candidate
//! centroid per contiguous low-coverage region.

use gs_core::GeoPoint;

use crate::Dbscan;

/// Parameters for [`find_low_coverage`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LowCoverageParams {
    /// Cells scoring below this percentile of all retained cells are
    /// considered underserved.
    pub percentile: f64,
    pub dbscan: Dbscan,
}

impl Default for LowCoverageParams {
    fn default() -> Self {
        Self { percentile: 25.0, dbscan: Dbscan::default() }
    }
}

/// Return one centroid per contiguous low-coverage region.
///
/// `cells` and `scores` must be index-aligned.  Scattered low cells that
/// never reach `min_points` density are noise and yield no centroid; an
/// empty input yields an empty result.
pub fn find_low_coverage(
    cells: &[GeoPoint],
    scores: &[f64],
    params: &LowCoverageParams,
) -> Vec<GeoPoint> {
    debug_assert_eq!(cells.len(), scores.len(), "cells and scores must align");
    if cells.is_empty() {
        return Vec::new();
    }

    let threshold = percentile(scores, params.percentile);
    let low_cells: Vec<GeoPoint> = cells
        .iter()
        .zip(scores)
        .filter(|&(_, &score)| score < threshold)
        .map(|(cell, _)| *cell)
        .collect();

    params
        .dbscan
        .cluster(&low_cells)
        .into_iter()
        .map(|c| c.centroid)
        .collect()
}

/// Percentile with linear interpolation between order statistics
/// (`rank = p/100 · (n−1)`), NumPy's default rule.
fn percentile(values: &[f64], p: f64) -> f64 {
    debug_assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = rank - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }
}

#[cfg(test)]
pub(crate) fn percentile_for_tests(values: &[f64], p: f64) -> f64 {
    percentile(values, p)
}
