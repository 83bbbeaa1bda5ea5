//! The C-space graph: an undirected adjacency list over stable node ids.
//!
//! Node attributes (`value`, `rhs`, `meta`, `flag`) are *not* stored here;
//! they live in [`crate::algorithm::Algorithm`] as parallel vectors indexed
//! by [`NodeId`], struct-of-arrays style, so the priority queue and the
//! upwind registry can update them without borrowing through the graph.
//! This mirrors the teacher's own separation between a graph's topology
//! and `NodeId`-indexed attribute storage.

/// A stable handle to a C-space vertex. `NodeId`s are never reused or
/// invalidated: the graph only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("more than u32::MAX nodes"))
    }

    /// Dense array index backing this id, used by the struct-of-arrays
    /// attribute vectors in [`crate::algorithm::Algorithm`].
    #[must_use]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Undirected adjacency list over [`NodeId`]s, plus an optional 2-D
/// coordinate per node (populated by [`crate::grid::Grid`]; the LSM
/// kernel needs it to tell whether two upwind neighbors lie on
/// orthogonal axes).
#[derive(Debug, Clone, Default)]
pub struct CSpace {
    neighbors: Vec<Vec<NodeId>>,
    coord: Vec<Option<(i64, i64)>>,
}

impl CSpace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices currently in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Add a new, unconnected vertex and return its id.
    pub fn add_vertex(&mut self) -> NodeId {
        let id = NodeId::new(self.neighbors.len());
        self.neighbors.push(Vec::new());
        self.coord.push(None);
        id
    }

    /// Link `a` and `b` in both directions. Idempotent: linking the
    /// same pair twice does not create a duplicate edge.
    pub fn add_neighbor(&mut self, a: NodeId, b: NodeId) {
        if !self.neighbors[a.index()].contains(&b) {
            self.neighbors[a.index()].push(b);
        }
        if !self.neighbors[b.index()].contains(&a) {
            self.neighbors[b.index()].push(a);
        }
    }

    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.neighbors[node.index()]
    }

    pub fn set_coord(&mut self, node: NodeId, ix: i64, iy: i64) {
        self.coord[node.index()] = Some((ix, iy));
    }

    #[must_use]
    pub fn coord(&self, node: NodeId) -> Option<(i64, i64)> {
        self.coord[node.index()]
    }

    #[must_use]
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.neighbors.len()).map(NodeId::new)
    }
}
