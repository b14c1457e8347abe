//! The multi-layer density estimator.
//!
//! Produces the masked, index-aligned density surface the clusterer and
//! heat sampler consume.  Stages, in order:
//!
//! 1. **Proximity** — per grid cell, `Σ weight[mode] · exp(−d_min_km)`
//!    over the reduced node set of each density mode, plus the
//!    existing-site (charging) term with its own weight.
//! 2. **Smoothing** — the raw surface becomes the weight vector of a KDE
//!    over the grid coordinates, evaluated back on the grid.
//! 3. **Normalization** — min-max into [0, 1]; constant → all zeros.
//! 4. **Edge penalty** — `× exp(−0.5 · d_center / radius)`, damping the
//!    ring where the enlarged fetch window distorts upstream data.
//!    Applied BEFORE the mask.
//! 5. **Radius mask** — cells farther than `radius_km` from the center
//!    are dropped; cells and scores are filtered together.
//! 6. **Secondary layers** — land use (signed category kernel) and
//!    population (count-weighted kernel), evaluated on the masked cells
//!    and normalized.
//! 7. **Combination** — literal weighted sum with the query's layer
//!    weights.

use gs_core::{DistanceMatrix, GeoPoint, Grid, LandUseCategory, Query, TransitMode};
use rustc_hash::FxHashMap;

use crate::{combine, min_max_normalize, Kde2};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Everything the estimator consumes, already reduced.
///
/// All point sets may be empty; an empty set simply contributes nothing to
/// its layer.
pub struct DensityInputs<'a> {
    /// Reduced node centers per mode.  Missing modes count as empty.
    pub mode_nodes: &'a FxHashMap<TransitMode, Vec<GeoPoint>>,
    /// Reduced existing-site coordinates (the charging proximity term).
    pub existing_sites: &'a [GeoPoint],
    /// Land-use centroids per category.
    pub land_use: &'a FxHashMap<LandUseCategory, Vec<GeoPoint>>,
    /// Settlement centroids with population counts.
    pub population: &'a [(GeoPoint, f64)],
}

// ── Output ────────────────────────────────────────────────────────────────────

/// The masked density surface.  All vectors have the same length and are
/// index-aligned with `cells`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensitySurface {
    /// Grid cells within the query radius, in original grid order.
    pub cells: Vec<GeoPoint>,
    /// Normalized transit/infrastructure layer, edge penalty applied.
    pub infrastructure: Vec<f64>,
    /// Normalized land-use layer.
    pub land_use: Vec<f64>,
    /// Normalized population layer.
    pub population: Vec<f64>,
    /// Weighted combination of the layers above.
    pub combined: Vec<f64>,
}

// ── Estimator ─────────────────────────────────────────────────────────────────

/// Computes a [`DensitySurface`] for one query.
pub struct DensityEstimator<'a> {
    query: &'a Query,
}

impl<'a> DensityEstimator<'a> {
    pub fn new(query: &'a Query) -> Self {
        Self { query }
    }

    /// Run all estimation stages over `grid`.
    pub fn estimate(&self, grid: &Grid, inputs: &DensityInputs<'_>) -> DensitySurface {
        let mut infra = self.infrastructure_raw(grid, inputs);

        // Smooth the raw proximity surface: use it as KDE weights over the
        // grid coordinates and read the continuous estimate back.
        let kde = Kde2::fit(grid.cells(), &infra);
        infra = kde.evaluate(grid.cells());
        min_max_normalize(&mut infra);

        // Edge penalty, then the radius mask — in that order, so the
        // damping also applies to cells right at the boundary.
        let center_km: Vec<f64> = grid
            .cells()
            .iter()
            .map(|c| c.distance_km(self.query.center()))
            .collect();
        for (score, d) in infra.iter_mut().zip(&center_km) {
            *score *= (-0.5 * d / self.query.radius_km()).exp();
        }

        let mut cells = Vec::new();
        let mut infrastructure = Vec::new();
        for (i, cell) in grid.cells().iter().enumerate() {
            if center_km[i] <= self.query.radius_km() {
                cells.push(*cell);
                infrastructure.push(infra[i]);
            }
        }

        let land_use = self.land_use_layer(&cells, inputs);
        let population = self.population_layer(&cells, inputs);

        let w = self.query.layer_weights();
        let combined = combine(
            cells.len(),
            &[
                (w.infrastructure, Some(infrastructure.as_slice())),
                (w.land_use, Some(land_use.as_slice())),
                (w.population, Some(population.as_slice())),
            ],
        );

        DensitySurface { cells, infrastructure, land_use, population, combined }
    }

    /// Raw weighted proximity over the full (unmasked) grid.
    fn infrastructure_raw(&self, grid: &Grid, inputs: &DensityInputs<'_>) -> Vec<f64> {
        let mut raw = vec![0.0; grid.len()];

        for mode in TransitMode::DENSITY_MODES {
            let weight = self.query.mode_weights().for_mode(mode);
            let Some(nodes) = inputs.mode_nodes.get(&mode) else { continue };
            if weight == 0.0 || nodes.is_empty() {
                continue;
            }
            let mins = DistanceMatrix::between(grid.cells(), nodes).min_per_row();
            for (score, d) in raw.iter_mut().zip(mins) {
                *score += weight * (-d).exp();
            }
        }

        let charging = self.query.mode_weights().charging;
        if charging > 0.0 && !inputs.existing_sites.is_empty() {
            let mins =
                DistanceMatrix::between(grid.cells(), inputs.existing_sites).min_per_row();
            for (score, d) in raw.iter_mut().zip(mins) {
                *score += charging * (-d).exp();
            }
        }

        raw
    }

    /// Signed land-use kernel density over the masked cells, normalized.
    fn land_use_layer(&self, cells: &[GeoPoint], inputs: &DensityInputs<'_>) -> Vec<f64> {
        let mut points = Vec::new();
        let mut weights = Vec::new();
        for category in LandUseCategory::ALL {
            let Some(coords) = inputs.land_use.get(&category) else { continue };
            for &c in coords {
                points.push(c);
                weights.push(category.factor());
            }
        }

        let mut layer = Kde2::fit(&points, &weights).evaluate(cells);
        min_max_normalize(&mut layer);
        layer
    }

    /// Population-weighted kernel density over the masked cells, normalized.
    fn population_layer(&self, cells: &[GeoPoint], inputs: &DensityInputs<'_>) -> Vec<f64> {
        let points: Vec<GeoPoint> = inputs.population.iter().map(|(c, _)| *c).collect();
        let weights: Vec<f64> = inputs.population.iter().map(|(_, pop)| *pop).collect();

        let mut layer = Kde2::fit(&points, &weights).evaluate(cells);
        min_max_normalize(&mut layer);
        layer
    }
}
