//! The one-shot analysis pipeline.

use gs_cluster::{find_low_coverage, LowCoverageParams};
use gs_core::{GeoPoint, Grid, Query, TransitMode};
use gs_density::{
    reduce_nodes, DensityEstimator, DensityInputs, DensitySurface,
    DEFAULT_REDUCTION_BANDWIDTH_DEG,
};
use gs_spatial::{
    propose_sites, sample_road_heat, GridIndex, RoadClass, RoadHeatSegment, RoadNetwork,
    DEFAULT_MIN_SEPARATION_KM, DEFAULT_SAMPLES_PER_EDGE,
};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::population::parse_records;
use crate::{
    AreaDataProvider, LandUseProvider, PipelineError, PipelineResult, PopulationProvider,
};

// ── AnalysisParams ────────────────────────────────────────────────────────────

/// Tunable parameters of the analysis stages.  The defaults reproduce the
/// reference model; tests shrink the grid and scale the clustering radius
/// accordingly.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisParams {
    /// Mode-seeking bandwidth for node reduction, in degrees.
    pub reduction_bandwidth_deg: f64,
    /// Threshold percentile and DBSCAN parameters for low-coverage cells.
    pub low_coverage: LowCoverageParams,
    /// Minimum geodesic distance between a proposed and an existing site.
    pub min_separation_km: f64,
    /// Road class sampled by the heat stage.
    pub heat_class: RoadClass,
    /// Sample points per heat edge.  Values below 2 are clamped to 2
    /// (both endpoints) by the sampler.
    pub samples_per_edge: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            reduction_bandwidth_deg: DEFAULT_REDUCTION_BANDWIDTH_DEG,
            low_coverage: LowCoverageParams::default(),
            min_separation_km: DEFAULT_MIN_SEPARATION_KM,
            heat_class: RoadClass::Secondary,
            samples_per_edge: DEFAULT_SAMPLES_PER_EDGE,
        }
    }
}

// ── Analysis ──────────────────────────────────────────────────────────────────

/// Everything one pipeline run produces.  Request-scoped and immutable;
/// caching or transport encoding is the caller's concern.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Masked grid cells with per-layer and combined density scores.
    pub surface: DensitySurface,
    /// Centroids of detected low-coverage regions, before snapping.
    pub low_coverage_centroids: Vec<GeoPoint>,
    /// Proposed site coordinates (snapped to the Drive network), in
    /// centroid order.
    pub proposed_sites: Vec<GeoPoint>,
    /// Snapped candidates rejected for sitting too close to an existing
    /// site.
    pub rejected_sites: Vec<GeoPoint>,
    /// Per-edge coverage scores for rendering.
    pub road_heat: Vec<RoadHeatSegment>,
    /// Malformed population records dropped during parsing.
    pub skipped_population_records: usize,
    /// Site features without a representable coordinate (empty polygons).
    pub skipped_site_features: usize,
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Runs the full analysis for one validated [`Query`].
///
/// ```rust,ignore
/// let query = Query::new(50.733334, 7.1, 25.0)?;
/// let analysis = Pipeline::new(&query).run(&osm, &corine, &census)?;
/// ```
pub struct Pipeline<'a> {
    query: &'a Query,
    params: AnalysisParams,
}

impl<'a> Pipeline<'a> {
    pub fn new(query: &'a Query) -> Self {
        Self { query, params: AnalysisParams::default() }
    }

    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    /// Execute all stages.  All-or-nothing: the first failure aborts the
    /// run and no partial result is returned.
    pub fn run<A, L, P>(&self, area: &A, land_use: &L, population: &P) -> PipelineResult<Analysis>
    where
        A: AreaDataProvider,
        L: LandUseProvider,
        P: PopulationProvider,
    {
        let q = self.query;
        let fetch_km = q.fetch_radius_km();

        // ① Fetch.  Providers see the buffered radius.
        let area_data = area
            .area_data(q.center(), fetch_km)
            .map_err(|source| PipelineError::Upstream { provider: "area", source })?;
        let land_use_data = land_use
            .land_use(q.center(), fetch_km)
            .map_err(|source| PipelineError::Upstream { provider: "land-use", source })?;
        let raw_population = population
            .population(q.center(), fetch_km)
            .map_err(|source| PipelineError::Upstream { provider: "population", source })?;

        let (population_records, skipped_population_records) = parse_records(&raw_population);

        let mut existing_sites = Vec::with_capacity(area_data.existing_sites.len());
        let mut skipped_site_features = 0usize;
        for feature in &area_data.existing_sites {
            match feature.representative_coordinate() {
                Some(coord) => existing_sites.push(coord),
                None => skipped_site_features += 1,
            }
        }
        debug!(
            existing = existing_sites.len(),
            skipped_sites = skipped_site_features,
            population = population_records.len(),
            skipped_population = skipped_population_records,
            "fetched upstream data"
        );

        // ② Reduce raw point sets to representative centers.
        let mut mode_nodes: FxHashMap<TransitMode, Vec<GeoPoint>> = FxHashMap::default();
        for mode in TransitMode::DENSITY_MODES {
            let reduced = reduce_nodes(
                area_data.networks.node_positions(mode),
                self.params.reduction_bandwidth_deg,
            );
            debug!(%mode, centers = reduced.len(), "reduced network nodes");
            mode_nodes.insert(mode, reduced);
        }
        let reduced_sites =
            reduce_nodes(&existing_sites, self.params.reduction_bandwidth_deg);

        // ③ Density surface over the fixed grid.
        let grid = Grid::build(q.center(), &q.grid);
        let population_points: Vec<(GeoPoint, f64)> = population_records
            .iter()
            .map(|r| (r.coordinate, r.population))
            .collect();
        let inputs = DensityInputs {
            mode_nodes: &mode_nodes,
            existing_sites: &reduced_sites,
            land_use: &land_use_data,
            population: &population_points,
        };
        let surface = DensityEstimator::new(q).estimate(&grid, &inputs);
        debug!(cells = surface.cells.len(), "estimated density surface");

        // ④ Low-coverage centroids.
        let low_coverage_centroids =
            find_low_coverage(&surface.cells, &surface.combined, &self.params.low_coverage);
        debug!(centroids = low_coverage_centroids.len(), "clustered low-coverage cells");

        // ⑤ Snap to the Drive network and enforce separation.  The check
        // runs against the full (unreduced) existing-site list.
        let fallback = RoadNetwork::empty();
        let drive = area_data
            .networks
            .get(TransitMode::Drive)
            .unwrap_or(&fallback);
        let siting = propose_sites(
            &low_coverage_centroids,
            &existing_sites,
            drive,
            self.params.min_separation_km,
        )?;

        // ⑥ Road heat over the same surface.
        let index = GridIndex::new(&surface.cells, &surface.combined);
        let road_heat =
            sample_road_heat(drive, self.params.heat_class, &index, q, self.params.samples_per_edge);

        info!(
            centroids = low_coverage_centroids.len(),
            proposed = siting.proposed.len(),
            rejected = siting.rejected.len(),
            heat_edges = road_heat.len(),
            "analysis complete"
        );

        Ok(Analysis {
            surface,
            low_coverage_centroids,
            proposed_sites: siting.proposed,
            rejected_sites: siting.rejected,
            road_heat,
            skipped_population_records,
            skipped_site_features,
        })
    }
}
