//! Site feature geometry.
//!
//! Existing-site features arrive from the data provider as either a point
//! or a polygon footprint.  The tagged variant replaces runtime geometry
//! inspection: every consumer goes through `representative_coordinate()`.

use gs_core::GeoPoint;

/// Geometry of an existing-site feature.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SiteGeometry {
    Point(GeoPoint),
    /// Polygon footprint as a ring of vertices (closing vertex optional).
    Polygon(Vec<GeoPoint>),
}

impl SiteGeometry {
    /// The single coordinate standing in for this feature: the point
    /// itself, or the vertex centroid of a polygon.
    ///
    /// Returns `None` for a degenerate (empty) polygon; the pipeline
    /// counts those as skipped features rather than failing.
    pub fn representative_coordinate(&self) -> Option<GeoPoint> {
        match self {
            SiteGeometry::Point(p) => Some(*p),
            SiteGeometry::Polygon(ring) => {
                if ring.is_empty() {
                    return None;
                }
                let mut lat = 0.0;
                let mut lon = 0.0;
                for v in ring {
                    lat += v.lat;
                    lon += v.lon;
                }
                let n = ring.len() as f64;
                Some(GeoPoint::new(lat / n, lon / n))
            }
        }
    }
}
