//! Density-based spatial clustering (DBSCAN) over coordinates in degree
//! space.
//!
//! Two points belong to the same cluster when they are connected through a
//! chain of points within `eps_deg` of each other, and every chain link
//! has at least `min_points` neighbors (counting itself).  Points that
//! never reach a dense neighborhood are noise and form no cluster.
//!
//! Neighborhood queries go through an R-tree, so clustering a few thousand
//! grid cells is O(n log n) rather than the brute-force O(n²).

use gs_core::GeoPoint;
use rstar::primitives::GeomWithData;
use rstar::RTree;

/// One detected cluster: member indices into the input slice plus the
/// arithmetic-mean centroid of the member coordinates.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    pub members: Vec<usize>,
    pub centroid: GeoPoint,
}

/// DBSCAN parameters.  Defaults match the reference analysis: 0.01°
/// neighborhood radius, 15-point minimum density.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dbscan {
    /// Neighborhood radius in degrees.
    pub eps_deg: f64,
    /// Minimum neighborhood size for a core point, counting the point
    /// itself.
    pub min_points: usize,
}

impl Default for Dbscan {
    fn default() -> Self {
        Self { eps_deg: 0.01, min_points: 15 }
    }
}

/// Per-point state during label expansion.
#[derive(Copy, Clone, PartialEq)]
enum Label {
    Unvisited,
    Noise,
    Cluster(usize),
}

impl Dbscan {
    /// Cluster `points`, discarding noise.
    ///
    /// Clusters are emitted in the order their first core point appears in
    /// the input, and members are listed in ascending input index — the
    /// whole result is a pure function of the input.
    pub fn cluster(&self, points: &[GeoPoint]) -> Vec<Cluster> {
        if points.is_empty() {
            return Vec::new();
        }

        let tree: RTree<GeomWithData<[f64; 2], usize>> = RTree::bulk_load(
            points
                .iter()
                .enumerate()
                .map(|(i, p)| GeomWithData::new([p.lat, p.lon], i))
                .collect(),
        );
        let eps_sq = self.eps_deg * self.eps_deg;
        let neighbors_of = |i: usize| -> Vec<usize> {
            let p = &points[i];
            let mut ids: Vec<usize> = tree
                .locate_within_distance([p.lat, p.lon], eps_sq)
                .map(|entry| entry.data)
                .collect();
            ids.sort_unstable(); // R-tree order is not stable; labeling is
            ids
        };

        let mut labels = vec![Label::Unvisited; points.len()];
        let mut clusters = Vec::new();

        for i in 0..points.len() {
            if labels[i] != Label::Unvisited {
                continue;
            }
            let seed_neighbors = neighbors_of(i);
            if seed_neighbors.len() < self.min_points {
                labels[i] = Label::Noise;
                continue;
            }

            // i is a core point: grow a new cluster from it.
            let cluster_id = clusters.len();
            labels[i] = Label::Cluster(cluster_id);
            let mut members = vec![i];
            let mut frontier = seed_neighbors;

            let mut cursor = 0;
            while cursor < frontier.len() {
                let j = frontier[cursor];
                cursor += 1;

                match labels[j] {
                    // Noise points become border members but never expand.
                    Label::Noise => {
                        labels[j] = Label::Cluster(cluster_id);
                        members.push(j);
                    }
                    Label::Unvisited => {
                        labels[j] = Label::Cluster(cluster_id);
                        members.push(j);
                        let j_neighbors = neighbors_of(j);
                        if j_neighbors.len() >= self.min_points {
                            frontier.extend(j_neighbors);
                        }
                    }
                    Label::Cluster(_) => {}
                }
            }

            members.sort_unstable();
            let centroid = mean_coordinate(points, &members);
            clusters.push(Cluster { members, centroid });
        }

        clusters
    }
}

fn mean_coordinate(points: &[GeoPoint], members: &[usize]) -> GeoPoint {
    let mut lat = 0.0;
    let mut lon = 0.0;
    for &i in members {
        lat += points[i].lat;
        lon += points[i].lon;
    }
    let n = members.len() as f64;
    GeoPoint::new(lat / n, lon / n)
}
