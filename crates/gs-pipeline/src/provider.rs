//! Data-provider contracts.
//!
//! The pipeline is pure computation; everything that touches the outside
//! world (map extracts, feature databases, census tables) sits behind
//! these traits.  Providers are handed the *fetch* radius — the query
//! radius enlarged by [`FETCH_BUFFER_FACTOR`](gs_core::query::FETCH_BUFFER_FACTOR)
//! — so that graphs and feature sets are not truncated at the analysis
//! boundary.
//!
//! Provider failures abort the whole run; empty results do not (an empty
//! mode or category simply contributes nothing).

use gs_core::{GeoPoint, LandUseCategory, TransitMode};
use gs_spatial::RoadNetwork;
use rustc_hash::FxHashMap;

use crate::{ProviderError, RawPopulationRecord, SiteGeometry};

// ── ModeNetworks ──────────────────────────────────────────────────────────────

/// Per-mode road/transit graphs.  Modes the provider could not supply are
/// simply absent and treated as empty.
#[derive(Default)]
pub struct ModeNetworks {
    networks: FxHashMap<TransitMode, RoadNetwork>,
}

impl ModeNetworks {
    pub fn insert(&mut self, mode: TransitMode, network: RoadNetwork) {
        self.networks.insert(mode, network);
    }

    pub fn get(&self, mode: TransitMode) -> Option<&RoadNetwork> {
        self.networks.get(&mode)
    }

    /// Node coordinates of `mode`, or an empty slice if absent.
    pub fn node_positions(&self, mode: TransitMode) -> &[GeoPoint] {
        self.get(mode).map(RoadNetwork::node_positions).unwrap_or(&[])
    }
}

/// Everything the area provider returns for one request.
pub struct AreaData {
    pub networks: ModeNetworks,
    /// Existing charging-site features (point or polygon).
    pub existing_sites: Vec<SiteGeometry>,
}

/// Per-category land-use centroids.
pub type LandUseData = FxHashMap<LandUseCategory, Vec<GeoPoint>>;

// ── Provider traits ───────────────────────────────────────────────────────────

/// Supplies routable graphs and existing-site features around a point.
pub trait AreaDataProvider {
    fn area_data(&self, center: GeoPoint, radius_km: f64) -> Result<AreaData, ProviderError>;
}

/// Supplies land-use centroids per category around a point.
pub trait LandUseProvider {
    fn land_use(&self, center: GeoPoint, radius_km: f64) -> Result<LandUseData, ProviderError>;
}

/// Supplies raw population records around a point.  Records are validated
/// by the pipeline, which counts (rather than hides) malformed rows.
pub trait PopulationProvider {
    fn population(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<RawPopulationRecord>, ProviderError>;
}
