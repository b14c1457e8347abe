//! Road network representation and builder.
//!
//! The network stores node positions, undirected classed edges, and an
//! R-tree over node coordinates.  There is no adjacency structure: the
//! analysis never routes through the graph, it only (a) snaps candidate
//! coordinates to the nearest node and (b) iterates edges of a given road
//! class for heat sampling.

use gs_core::GeoPoint;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

// ── NodeId ────────────────────────────────────────────────────────────────────

/// Index of a road-network node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

// ── RoadClass ─────────────────────────────────────────────────────────────────

/// Road classification, collapsed from OSM-style highway tags.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadClass {
    Motorway,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Service,
    Other,
}

impl RoadClass {
    /// Map an OSM `highway` tag value to a class.  Link roads collapse
    /// into their parent class; anything unrecognized is `Other` (total —
    /// providers never fail on an exotic tag).
    pub fn from_highway_tag(tag: &str) -> RoadClass {
        match tag {
            "motorway" | "motorway_link" | "trunk" | "trunk_link" => RoadClass::Motorway,
            "primary" | "primary_link" => RoadClass::Primary,
            "secondary" | "secondary_link" => RoadClass::Secondary,
            "tertiary" | "tertiary_link" => RoadClass::Tertiary,
            "residential" | "living_street" | "unclassified" => RoadClass::Residential,
            "service" => RoadClass::Service,
            _ => RoadClass::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadClass::Motorway    => "motorway",
            RoadClass::Primary     => "primary",
            RoadClass::Secondary   => "secondary",
            RoadClass::Tertiary    => "tertiary",
            RoadClass::Residential => "residential",
            RoadClass::Service     => "service",
            RoadClass::Other       => "other",
        }
    }
}

impl std::fmt::Display for RoadClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-node ranking within a metro area (error < 0.1 % at ≤ 60°
    /// latitude).
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Immutable road graph: node positions, classed undirected edges, and a
/// spatial index for nearest-node snapping.
///
/// Edge arrays are parallel and indexed together.  Do not construct
/// directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// First endpoint of each edge.
    pub edge_a: Vec<NodeId>,
    /// Second endpoint of each edge.
    pub edge_b: Vec<NodeId>,
    /// Road class of each edge.
    pub edge_class: Vec<RoadClass>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    ///
    /// Useful as the value of a mode the provider could not supply.
    /// Snapping against an empty network returns `None`.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Position of `node`.
    #[inline]
    pub fn position(&self, node: NodeId) -> GeoPoint {
        self.node_pos[node.index()]
    }

    /// All node positions, for density reduction.
    pub fn node_positions(&self) -> &[GeoPoint] {
        &self.node_pos
    }

    /// Return the `NodeId` of the nearest road node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Endpoint coordinate pairs of every edge with the given class.
    pub fn edges_of_class(
        &self,
        class: RoadClass,
    ) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        self.edge_class
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == class)
            .map(|(i, _)| (self.position(self.edge_a[i]), self.position(self.edge_b[i])))
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use gs_core::GeoPoint;
/// use gs_spatial::{RoadClass, RoadNetworkBuilder};
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(50.73, 7.10));
/// let c = b.add_node(GeoPoint::new(50.74, 7.11));
/// b.add_edge(a, c, RoadClass::Secondary);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 1);
/// ```
pub struct RoadNetworkBuilder {
    nodes: Vec<GeoPoint>,
    edge_a: Vec<NodeId>,
    edge_b: Vec<NodeId>,
    edge_class: Vec<RoadClass>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edge_a: Vec::new(),
            edge_b: Vec::new(),
            edge_class: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edge_a: Vec::with_capacity(edges),
            edge_b: Vec::with_capacity(edges),
            edge_class: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add an undirected edge between `a` and `b`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, class: RoadClass) {
        self.edge_a.push(a);
        self.edge_b.push(b);
        self.edge_class.push(class);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Bulk-loads the R-tree: O(N log N), faster than N inserts.
    pub fn build(self) -> RoadNetwork {
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry { point: [pos.lat, pos.lon], id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            edge_a: self.edge_a,
            edge_b: self.edge_b,
            edge_class: self.edge_class,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
