//! Candidate-site optimization.
//!
//! Each low-coverage centroid is snapped to the nearest routable road node
//! (a charging station has to sit on the road network, not in the middle
//! of a field), then checked against every existing site: candidates
//! closer than the minimum separation are rejected.  The step is greedy —
//! candidates are processed in input order and do not interact.

use gs_core::GeoPoint;

use crate::{RoadNetwork, SpatialError, SpatialResult};

/// Minimum geodesic distance from any existing site, in kilometres.
pub const DEFAULT_MIN_SEPARATION_KM: f64 = 1.0;

/// Result of the siting pass.  `proposed` preserves the input centroid
/// order; `rejected` holds the snapped candidates that fell within the
/// separation radius of an existing site.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SitingOutcome {
    pub proposed: Vec<GeoPoint>,
    pub rejected: Vec<GeoPoint>,
}

/// Snap each centroid to the Drive network and filter by separation.
///
/// With no existing sites every candidate is accepted unconditionally.
/// Returns [`SpatialError::EmptyNetwork`] if there are centroids to place
/// but the network has no nodes.
pub fn propose_sites(
    centroids: &[GeoPoint],
    existing_sites: &[GeoPoint],
    network: &RoadNetwork,
    min_separation_km: f64,
) -> SpatialResult<SitingOutcome> {
    if centroids.is_empty() {
        return Ok(SitingOutcome::default());
    }
    if network.is_empty() {
        return Err(SpatialError::EmptyNetwork);
    }

    let mut outcome = SitingOutcome::default();
    for &centroid in centroids {
        // node_count > 0 here, so the snap cannot fail.
        let Some(node) = network.snap_to_node(centroid) else {
            return Err(SpatialError::EmptyNetwork);
        };
        let candidate = network.position(node);

        let too_close = existing_sites
            .iter()
            .any(|site| candidate.distance_km(*site) <= min_separation_km);
        if too_close {
            outcome.rejected.push(candidate);
        } else {
            outcome.proposed.push(candidate);
        }
    }

    Ok(outcome)
}
