//! Validated, immutable request configuration.
//!
//! A `Query` is constructed once per request, validated up front, and then
//! threaded by reference through every pipeline stage.  There is no
//! module-level center/radius state anywhere in the workspace.

use crate::{CoreError, CoreResult, GeoPoint, GridSpec, ModeWeights};

/// Factor applied to the query radius when fetching upstream data.
///
/// Data providers fetch over this enlarged window so that graphs and
/// feature sets are not truncated at the analysis boundary; the analysis
/// grid itself always uses the fixed angular window in [`GridSpec`].
pub const FETCH_BUFFER_FACTOR: f64 = 1.7;

// ── LayerWeights ──────────────────────────────────────────────────────────────

/// Combination weights for the normalized density layers.
///
/// These are arbitrary non-negative reals and the combined surface is a
/// literal weighted sum — there is deliberately NO renormalization when
/// they do not sum to 1.  Callers use that freedom to over- or
/// under-weight the whole surface.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerWeights {
    /// Transit/infrastructure proximity layer.
    pub infrastructure: f64,
    /// Neighborhood land-use layer.
    pub land_use: f64,
    /// Population layer.
    pub population: f64,
}

impl Default for LayerWeights {
    fn default() -> Self {
        Self { infrastructure: 0.5, land_use: 0.3, population: 0.2 }
    }
}

impl LayerWeights {
    /// Reject negative or non-finite weights.  Does NOT require the
    /// weights to sum to 1.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in [
            ("layer_weights.infrastructure", self.infrastructure),
            ("layer_weights.land_use", self.land_use),
            ("layer_weights.population", self.population),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

// ── Query ─────────────────────────────────────────────────────────────────────

/// One analysis request: center, radius, and all tunable weights.
///
/// Immutable after construction; `Query::new` performs all parameter
/// validation so downstream components never see out-of-range input.
/// The validated fields are private — they change only through the
/// `with_*` setters, which re-validate.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    center: GeoPoint,
    radius_km: f64,
    mode_weights: ModeWeights,
    layer_weights: LayerWeights,
    /// Lattice parameters.  Not validated, and freely adjustable (tests
    /// shrink the resolution to keep density estimation fast).
    pub grid: GridSpec,
}

impl Query {
    /// Validate and construct a query with default weights and grid spec.
    pub fn new(lat: f64, lon: f64, radius_km: f64) -> CoreResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::InvalidParameter { name: "latitude", value: lat });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::InvalidParameter { name: "longitude", value: lon });
        }
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(CoreError::InvalidParameter { name: "radius_km", value: radius_km });
        }

        Ok(Self {
            center: GeoPoint::new(lat, lon),
            radius_km,
            mode_weights: ModeWeights::default(),
            layer_weights: LayerWeights::default(),
            grid: GridSpec::default(),
        })
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    /// Analysis radius in kilometres.  Strictly positive.
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn mode_weights(&self) -> ModeWeights {
        self.mode_weights
    }

    pub fn layer_weights(&self) -> LayerWeights {
        self.layer_weights
    }

    /// Replace the per-mode proximity weights.
    pub fn with_mode_weights(mut self, weights: ModeWeights) -> CoreResult<Self> {
        weights.validate()?;
        self.mode_weights = weights;
        Ok(self)
    }

    /// Replace the layer combination weights.
    pub fn with_layer_weights(mut self, weights: LayerWeights) -> CoreResult<Self> {
        weights.validate()?;
        self.layer_weights = weights;
        Ok(self)
    }

    /// Radius used by data providers: the query radius enlarged by
    /// [`FETCH_BUFFER_FACTOR`] to avoid edge-truncation artifacts.
    pub fn fetch_radius_km(&self) -> f64 {
        self.radius_km * FETCH_BUFFER_FACTOR
    }
}
