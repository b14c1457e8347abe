//! Per-road-segment coverage scores for visualization.
//!
//! Each qualifying edge is sampled at equally spaced points along the
//! straight line between its endpoints **in lat/lon space** — deliberately
//! not along the great circle, so output values match the reference
//! analysis (the distortion over sub-kilometre segments is negligible).
//! Each sample reads the density score of its nearest grid cell; the edge
//! score is the mean, and all edge scores are min-max normalized at the
//! end so a color scale can be applied directly.

use gs_core::{GeoPoint, Query};
use gs_density::min_max_normalize;
use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::{RoadClass, RoadNetwork};

/// Number of sample points per edge, endpoints included.
pub const DEFAULT_SAMPLES_PER_EDGE: usize = 10;

/// One scored road segment: the two endpoint coordinates and a normalized
/// coverage score in [0, 1].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadHeatSegment {
    pub a: GeoPoint,
    pub b: GeoPoint,
    pub score: f64,
}

// ── GridIndex ─────────────────────────────────────────────────────────────────

/// Nearest-cell lookup over the masked density grid.
///
/// Cells and scores must be index-aligned (they come from the same
/// [`DensitySurface`](gs_density::DensitySurface)).
pub struct GridIndex {
    tree: RTree<GeomWithData<[f64; 2], usize>>,
    scores: Vec<f64>,
}

impl GridIndex {
    /// # Panics
    /// Panics if `cells` and `scores` differ in length.
    pub fn new(cells: &[GeoPoint], scores: &[f64]) -> Self {
        assert_eq!(cells.len(), scores.len(), "cells and scores must align");
        let tree = RTree::bulk_load(
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| GeomWithData::new([c.lat, c.lon], i))
                .collect(),
        );
        Self { tree, scores: scores.to_vec() }
    }

    /// Density score of the grid cell nearest to `p`, or `None` for an
    /// empty grid.
    pub fn nearest_score(&self, p: GeoPoint) -> Option<f64> {
        self.tree
            .nearest_neighbor(&[p.lat, p.lon])
            .map(|entry| self.scores[entry.data])
    }
}

// ── Sampling ──────────────────────────────────────────────────────────────────

/// Score every edge of `class` that has at least one endpoint within the
/// query radius.
///
/// `samples_per_edge` is clamped to 2 (both endpoints) at minimum.
pub fn sample_road_heat(
    network: &RoadNetwork,
    class: RoadClass,
    index: &GridIndex,
    query: &Query,
    samples_per_edge: usize,
) -> Vec<RoadHeatSegment> {
    let samples = samples_per_edge.max(2);
    let center = query.center();
    let radius_km = query.radius_km();

    // Bounding-box half-width for cheap pre-rejection.  Must never reject
    // a point inside the radius: 1° covers at least 110.57 km of latitude
    // (and of longitude after the cos scaling), and the 5 % slack absorbs
    // the cos variation across the window.
    let cos_lat = center.lat.to_radians().cos().abs().max(f64::EPSILON);
    let half_deg = 1.05 * radius_km / (110.574 * cos_lat);
    let in_range = |p: GeoPoint| {
        p.within_bbox(center, half_deg) && p.distance_km(center) <= radius_km
    };

    let mut segments: Vec<RoadHeatSegment> = network
        .edges_of_class(class)
        .filter(|&(a, b)| in_range(a) || in_range(b))
        .map(|(a, b)| RoadHeatSegment { a, b, score: edge_score(a, b, index, samples) })
        .collect();

    let mut scores: Vec<f64> = segments.iter().map(|s| s.score).collect();
    min_max_normalize(&mut scores);
    for (segment, score) in segments.iter_mut().zip(scores) {
        segment.score = score;
    }

    segments
}

/// Mean nearest-cell score over equally spaced points between `a` and `b`.
fn edge_score(a: GeoPoint, b: GeoPoint, index: &GridIndex, samples: usize) -> f64 {
    debug_assert!(samples >= 2, "need both endpoints at minimum");
    let mut sum = 0.0;
    let mut count = 0usize;
    for i in 0..samples {
        let t = i as f64 / (samples - 1) as f64;
        let p = GeoPoint::new(a.lat + (b.lat - a.lat) * t, a.lon + (b.lon - a.lon) * t);
        if let Some(score) = index.nearest_score(p) {
            sum += score;
            count += 1;
        }
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}
