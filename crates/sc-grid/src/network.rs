//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges are the `EdgeId`s:
//!
//! ```text
//! node_out_start[n] .. node_out_start[n+1]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`,
//! `edge_capacity`, `edge_freespeed_mps`) are sorted by source node and
//! indexed by `EdgeId`.  A second CSR (`node_in_start` / `in_edges`) lists the
//! edges *entering* each node; activities are anchored on the first of them.
//!
//! # External identifiers
//!
//! Every node carries its [`LatticeCoord`], from which the textual node id
//! `"(s,a)"` and link id `"(s,a)->(s',a')"` are derived.  Both are indexed so
//! the CSV importer can resolve link ids back to edges.

use std::collections::{BTreeMap, HashMap};

use sc_core::{EdgeId, LatticeCoord, NodeId, Point2};

use crate::{GridError, GridResult};

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format.
///
/// All array fields are `pub` for direct indexed access.  Do not construct
/// directly; use [`RoadNetworkBuilder`] or [`generate_grid`](crate::generate_grid).
/// Immutable once built.
#[derive(Debug)]
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Jittered planar position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point2>,

    /// Lattice coordinate of each node.  Indexed by `NodeId`.
    pub node_coord: Vec<LatticeCoord>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer for outgoing edges.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// CSR row pointer into `in_edges`.  Length = `node_count + 1`.
    pub node_in_start: Vec<u32>,

    /// Incoming edges grouped by destination node, ascending `EdgeId` within
    /// each group.
    pub in_edges: Vec<EdgeId>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    pub edge_from: Vec<NodeId>,
    pub edge_to: Vec<NodeId>,

    /// Euclidean length between the endpoint positions, metres.
    pub edge_length_m: Vec<f64>,

    /// Flow capacity, vehicles per hour.
    pub edge_capacity: Vec<f64>,

    /// Maximum traversal speed, metres per second.
    pub edge_freespeed_mps: Vec<f64>,

    // ── Lookups ───────────────────────────────────────────────────────────
    by_coord: HashMap<LatticeCoord, NodeId>,
    by_link_label: HashMap<String, EdgeId>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// The node at lattice coordinate `coord`, if any.
    pub fn node_at(&self, coord: LatticeCoord) -> Option<NodeId> {
        self.by_coord.get(&coord).copied()
    }

    /// Resolve an external link id such as `"(0,1)->(0,0)"`.
    pub fn edge_by_label(&self, label: &str) -> Option<EdgeId> {
        self.by_link_label.get(label).copied()
    }

    /// External node id, e.g. `"(2,5)"`.
    pub fn node_label(&self, node: NodeId) -> String {
        self.node_coord[node.index()].node_label()
    }

    /// External link id, e.g. `"(2,5)->(2,4)"`.
    pub fn edge_label(&self, edge: EdgeId) -> String {
        let from = self.node_coord[self.edge_from[edge.index()].index()];
        let to   = self.node_coord[self.edge_to[edge.index()].index()];
        from.link_label(to)
    }

    /// Euclidean distance between two nodes in metres.
    #[inline]
    pub fn distance_m(&self, a: NodeId, b: NodeId) -> f64 {
        self.node_pos[a.index()].distance_m(self.node_pos[b.index()])
    }

    /// Diagonal of the node bounding box: an upper bound on any node-to-node
    /// distance in the network.  `0.0` for networks with fewer than two nodes.
    pub fn extent_m(&self) -> f64 {
        let mut iter = self.node_pos.iter();
        let Some(first) = iter.next() else {
            return 0.0;
        };
        let (mut min, mut max) = (*first, *first);
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        min.distance_m(max)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Slice of the `EdgeId`s entering `node`, ascending.
    #[inline]
    pub fn in_edges(&self, node: NodeId) -> &[EdgeId] {
        let start = self.node_in_start[node.index()] as usize;
        let end   = self.node_in_start[node.index() + 1] as usize;
        &self.in_edges[start..end]
    }

    /// The edge used to anchor activities located at `node`: the lowest
    /// `EdgeId` entering it.
    pub fn first_in_edge(&self, node: NodeId) -> GridResult<EdgeId> {
        if node.index() >= self.node_count() {
            return Err(GridError::NodeNotFound(node));
        }
        self.in_edges(node)
            .first()
            .copied()
            .ok_or(GridError::NoInEdge(node))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Edge count per whole-metre length bucket (lengths truncated).
    pub fn link_length_distribution(&self) -> BTreeMap<u64, u64> {
        let mut counts = BTreeMap::new();
        for &len in &self.edge_length_m {
            *counts.entry(len.max(0.0) as u64).or_insert(0) += 1;
        }
        counts
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// stable-sorts edges by source node (edges sharing a source keep their
/// insertion order) and constructs both CSR indexes.
///
/// # Example
///
/// ```
/// use sc_core::{LatticeCoord, Point2};
/// use sc_grid::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(LatticeCoord::new(0, 0), Point2::new(0.0, 0.0));
/// let c = b.add_node(LatticeCoord::new(0, 1), Point2::new(0.0, 100.0));
/// b.add_road(a, c, 100.0, 1_800.0, 4.3);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// assert!(net.edge_by_label("(0,1)->(0,0)").is_some());
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<(LatticeCoord, Point2)>,
    by_coord:  HashMap<LatticeCoord, NodeId>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:          NodeId,
    to:            NodeId,
    length_m:      f64,
    capacity:      f64,
    freespeed_mps: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), by_coord: HashMap::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            by_coord:  HashMap::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, coord: LatticeCoord, pos: Point2) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push((coord, pos));
        self.by_coord.insert(coord, id);
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(
        &mut self,
        from:          NodeId,
        to:            NodeId,
        length_m:      f64,
        capacity:      f64,
        freespeed_mps: f64,
    ) {
        self.raw_edges.push(RawEdge { from, to, length_m, capacity, freespeed_mps });
    }

    /// Add `a -> b` followed by `b -> a` with identical attributes.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64, capacity: f64, freespeed_mps: f64) {
        self.add_directed_edge(a, b, length_m, capacity, freespeed_mps);
        self.add_directed_edge(b, a, length_m, capacity, freespeed_mps);
    }

    /// Look up a node added earlier by its lattice coordinate.
    pub fn node_at(&self, coord: LatticeCoord) -> Option<NodeId> {
        self.by_coord.get(&coord).copied()
    }

    /// Position of a node added earlier (used to derive edge lengths).
    pub fn node_pos(&self, id: NodeId) -> Point2 {
        self.nodes[id.index()].1
    }

    pub fn node_coord(&self, id: NodeId) -> LatticeCoord {
        self.nodes[id.index()].0
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:          Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:            Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m:      Vec<f64>    = raw.iter().map(|e| e.length_m).collect();
        let edge_capacity:      Vec<f64>    = raw.iter().map(|e| e.capacity).collect();
        let edge_freespeed_mps: Vec<f64>    = raw.iter().map(|e| e.freespeed_mps).collect();

        // Outgoing CSR row pointer.
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        // Incoming CSR: counting sort of EdgeIds by destination.  Scanning in
        // EdgeId order keeps each group ascending.
        let mut node_in_start = vec![0u32; node_count + 1];
        for to in &edge_to {
            node_in_start[to.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_in_start[i] += node_in_start[i - 1];
        }
        let mut cursor: Vec<u32> = node_in_start[..node_count].to_vec();
        let mut in_edges = vec![EdgeId::INVALID; edge_count];
        for (i, to) in edge_to.iter().enumerate() {
            let slot = &mut cursor[to.index()];
            in_edges[*slot as usize] = EdgeId(i as u32);
            *slot += 1;
        }

        let (node_coord, node_pos): (Vec<LatticeCoord>, Vec<Point2>) =
            self.nodes.into_iter().unzip();

        let by_link_label: HashMap<String, EdgeId> = edge_from
            .iter()
            .zip(&edge_to)
            .enumerate()
            .map(|(i, (f, t))| {
                (node_coord[f.index()].link_label(node_coord[t.index()]), EdgeId(i as u32))
            })
            .collect();

        RoadNetwork {
            node_pos,
            node_coord,
            node_out_start,
            node_in_start,
            in_edges,
            edge_from,
            edge_to,
            edge_length_m,
            edge_capacity,
            edge_freespeed_mps,
            by_coord: self.by_coord,
            by_link_label,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
