//! Walkability graph construction.
//!
//! A [`TileGraph`] is an arena of [`GraphNode`]s, one per walkable cell,
//! addressed by [`NodeId`]. Neighbor lists store ids, never references, so
//! the graph is plain data: cloneable and shareable across threads.

use tilewalk_core::{FnTiles, Point, Range, TileSource};

use crate::neighbors::{Adjacency, Neighbors};

/// Stable index of a node inside a [`TileGraph`].
///
/// Ids are assigned in row-major scan order of the source region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in the graph's arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How neighbor lists are computed during construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildPolicy {
    /// Create every node first, then compute each node's neighbors against
    /// the complete node set.
    #[default]
    TwoPass,
    /// Compute each node's neighbors as it is created, against the nodes
    /// created so far. Every edge found is also appended to the earlier
    /// node, so earlier-created neighbors come first in each list.
    SinglePass,
}

/// Graph construction settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    pub adjacency: Adjacency,
    pub policy: BuildPolicy,
}

impl GraphConfig {
    /// Two-pass construction with the given adjacency.
    pub const fn new(adjacency: Adjacency) -> Self {
        Self {
            adjacency,
            policy: BuildPolicy::TwoPass,
        }
    }

    /// Return a copy using `policy`.
    pub const fn with_policy(self, policy: BuildPolicy) -> Self {
        Self {
            adjacency: self.adjacency,
            policy,
        }
    }
}

/// One walkable cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pos: Point,
    neighbors: Vec<NodeId>,
}

impl GraphNode {
    /// Grid coordinate of the cell.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Neighbor ids in construction order.
    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

/// Immutable adjacency graph over the walkable cells of a tile source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGraph {
    range: Range,
    config: GraphConfig,
    nodes: Vec<GraphNode>,
    // Range-sized, row-major: slot -> node id, `None` for blocked cells.
    slots: Vec<Option<NodeId>>,
}

impl TileGraph {
    /// Build the graph for `tiles`.
    ///
    /// A node exists exactly for each cell of `tiles.range()` that is
    /// walkable. A source without walkable cells yields an empty graph.
    pub fn build<T: TileSource + ?Sized>(tiles: &T, config: GraphConfig) -> Self {
        let range = tiles.range();
        let mut graph = Self {
            range,
            config,
            nodes: Vec::new(),
            slots: vec![None; range.len()],
        };
        match config.policy {
            BuildPolicy::TwoPass => graph.build_two_pass(tiles),
            BuildPolicy::SinglePass => graph.build_single_pass(tiles),
        }
        log::debug!(
            "built {:?} graph over {}: {} nodes, {} edges",
            config,
            range,
            graph.len(),
            graph.edge_count()
        );
        graph
    }

    /// Build the graph for a `width × height` region where `blocked(p)`
    /// marks impassable cells.
    pub fn from_fn(
        width: i32,
        height: i32,
        blocked: impl Fn(Point) -> bool,
        config: GraphConfig,
    ) -> Self {
        Self::build(&FnTiles::new(width, height, blocked), config)
    }

    fn insert(&mut self, p: Point) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(GraphNode {
            pos: p,
            neighbors: Vec::new(),
        });
        if let Some(i) = self.range.index_of(p) {
            self.slots[i] = Some(id);
        }
        id
    }

    fn build_two_pass<T: TileSource + ?Sized>(&mut self, tiles: &T) {
        for p in self.range {
            if tiles.is_walkable(p) {
                self.insert(p);
            }
        }

        let mut nb = Neighbors::new();
        for i in 0..self.nodes.len() {
            let pos = self.nodes[i].pos;
            let ids: Vec<NodeId> = nb
                .of(pos, self.config.adjacency, |q| tiles.is_walkable(q))
                .iter()
                .filter_map(|&q| self.node_id(q))
                .collect();
            self.nodes[i].neighbors = ids;
        }
    }

    fn build_single_pass<T: TileSource + ?Sized>(&mut self, tiles: &T) {
        let mut nb = Neighbors::new();
        for p in self.range {
            if !tiles.is_walkable(p) {
                continue;
            }
            let id = self.insert(p);
            // Only nodes created earlier in scan order are visible here.
            let earlier: Vec<NodeId> = nb
                .of(p, self.config.adjacency, |q| tiles.is_walkable(q))
                .iter()
                .filter_map(|&q| self.node_id(q))
                .collect();
            for n in earlier {
                self.nodes[id.index()].neighbors.push(n);
                self.nodes[n.index()].neighbors.push(id);
            }
        }
    }

    /// Settings the graph was built with.
    #[inline]
    pub fn config(&self) -> GraphConfig {
        self.config
    }

    /// Region the graph was built over.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Number of nodes (walkable cells).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of directed edges (sum of neighbor-list lengths).
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum()
    }

    /// Id of the node at `p`, if `p` is a walkable cell of the graph.
    #[inline]
    pub fn node_id(&self, p: Point) -> Option<NodeId> {
        let i = self.range.index_of(p)?;
        self.slots[i]
    }

    /// Whether there is a node at `p`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.node_id(p).is_some()
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not come from this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.index()]
    }

    /// The node at `p`, if any.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&GraphNode> {
        self.node_id(p).map(|id| self.node(id))
    }

    /// Coordinates of the neighbors of `p`, in neighbor-list order. Empty if
    /// there is no node at `p`.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        self.get(p)
            .into_iter()
            .flat_map(move |n| n.neighbors.iter().map(move |&id| self.node(id).pos))
    }

    /// All nodes in id (row-major) order.
    #[inline]
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &GraphNode> + '_ {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn ring() -> TileGraph {
        TileGraph::from_fn(3, 3, |q| q == p(1, 1), GraphConfig::default())
    }

    #[test]
    fn nodes_match_walkable_cells() {
        let g = ring();
        assert_eq!(g.len(), 8);
        assert!(!g.contains(p(1, 1)));
        for q in Range::with_size(3, 3) {
            assert_eq!(g.contains(q), q != p(1, 1));
        }
        assert!(!g.contains(p(3, 0)));
        assert!(!g.contains(p(-1, 0)));
    }

    #[test]
    fn ids_follow_scan_order() {
        let g = ring();
        let order: Vec<Point> = g.nodes().map(GraphNode::pos).collect();
        assert_eq!(
            order,
            vec![p(0, 0), p(1, 0), p(2, 0), p(0, 1), p(2, 1), p(0, 2), p(1, 2), p(2, 2)]
        );
        assert_eq!(g.node_id(p(2, 1)).map(NodeId::index), Some(4));
    }

    #[test]
    fn cardinal_neighbor_order() {
        let g = TileGraph::from_fn(3, 3, |_| false, GraphConfig::default());
        let center: Vec<Point> = g.neighbors(p(1, 1)).collect();
        assert_eq!(center, vec![p(0, 1), p(2, 1), p(1, 0), p(1, 2)]);
        let corner: Vec<Point> = g.neighbors(p(0, 0)).collect();
        assert_eq!(corner, vec![p(1, 0), p(0, 1)]);
    }

    #[test]
    fn no_diagonal_edges_in_cardinal_mode() {
        let g = ring();
        assert!(g.nodes().all(|n| {
            let a = n.pos();
            g.neighbors(a).all(|b| (a.x - b.x).abs() + (a.y - b.y).abs() == 1)
        }));
        assert_eq!(g.edge_count(), 16);
    }

    #[test]
    fn all_directions_neighbor_order() {
        let g = TileGraph::from_fn(2, 2, |_| false, GraphConfig::new(Adjacency::All));
        let got: Vec<Point> = g.neighbors(p(1, 0)).collect();
        assert_eq!(got, vec![p(0, 0), p(1, 1), p(0, 1)]);
        assert_eq!(g.edge_count(), 12);
    }

    #[test]
    fn diagonal_ignores_corner_walls() {
        // Both orthogonal corner cells are walls; the diagonal edge stays.
        let g = TileGraph::from_fn(
            2,
            2,
            |q| q == p(1, 0) || q == p(0, 1),
            GraphConfig::new(Adjacency::All),
        );
        assert_eq!(g.neighbors(p(0, 0)).collect::<Vec<_>>(), vec![p(1, 1)]);
        assert_eq!(g.neighbors(p(1, 1)).collect::<Vec<_>>(), vec![p(0, 0)]);
    }

    #[test]
    fn single_pass_puts_earlier_neighbors_first() {
        let cfg = GraphConfig::new(Adjacency::All).with_policy(BuildPolicy::SinglePass);
        let g = TileGraph::from_fn(2, 2, |_| false, cfg);
        assert_eq!(g.config(), cfg);
        assert_eq!(g.neighbors(p(1, 0)).collect::<Vec<_>>(), vec![p(0, 0), p(0, 1), p(1, 1)]);
        assert_eq!(g.neighbors(p(0, 0)).collect::<Vec<_>>(), vec![p(1, 0), p(0, 1), p(1, 1)]);
        assert_eq!(g.neighbors(p(1, 1)).collect::<Vec<_>>(), vec![p(0, 1), p(1, 0), p(0, 0)]);
    }

    #[test]
    fn single_pass_cardinal_order_differs_from_two_pass() {
        let two = TileGraph::from_fn(2, 2, |_| false, GraphConfig::default());
        let one = TileGraph::from_fn(
            2,
            2,
            |_| false,
            GraphConfig::default().with_policy(BuildPolicy::SinglePass),
        );
        assert_eq!(two.neighbors(p(0, 1)).collect::<Vec<_>>(), vec![p(1, 1), p(0, 0)]);
        assert_eq!(one.neighbors(p(0, 1)).collect::<Vec<_>>(), vec![p(0, 0), p(1, 1)]);
        assert_eq!(one.edge_count(), two.edge_count());
    }

    #[test]
    fn single_pass_is_symmetric_for_pure_sources() {
        let blocked = |q: Point| (q.x * 7 + q.y * 3) % 5 == 0;
        let cfg = GraphConfig::new(Adjacency::All).with_policy(BuildPolicy::SinglePass);
        let g = TileGraph::from_fn(6, 5, blocked, cfg);
        for n in g.nodes() {
            for m in g.neighbors(n.pos()) {
                assert!(g.neighbors(m).any(|back| back == n.pos()), "{} -> {}", n.pos(), m);
            }
        }
    }

    #[test]
    fn single_pass_edges_survive_inconsistent_sources() {
        // (0,0) turns blocked after the first two queries. Two-pass keeps
        // the edge it already found from (0,0) and loses the one back.
        let flaky = || {
            let calls = Cell::new(0);
            FnTiles::new(2, 1, move |q| {
                let n = calls.get();
                calls.set(n + 1);
                n >= 2 && q == p(0, 0)
            })
        };
        let two = TileGraph::build(&flaky(), GraphConfig::default());
        assert_eq!(two.neighbors(p(0, 0)).collect::<Vec<_>>(), vec![p(1, 0)]);
        assert_eq!(two.neighbors(p(1, 0)).count(), 0);

        // Single-pass only links from the later node, and then both ways.
        let cfg = GraphConfig::default().with_policy(BuildPolicy::SinglePass);
        let one = TileGraph::build(&flaky(), cfg);
        assert_eq!(one.len(), 2);
        assert_eq!(one.edge_count(), 0);

        for k in 2..7 {
            let calls = Cell::new(0u32);
            let tiles = FnTiles::new(5, 4, |_| {
                let n = calls.get();
                calls.set(n + 1);
                n % k == 0
            });
            let cfg = GraphConfig::new(Adjacency::All).with_policy(BuildPolicy::SinglePass);
            let g = TileGraph::build(&tiles, cfg);
            for n in g.nodes() {
                for m in g.neighbors(n.pos()) {
                    assert!(
                        g.neighbors(m).any(|back| back == n.pos()),
                        "k={k}: {} -> {m}",
                        n.pos()
                    );
                }
            }
        }
    }

    #[test]
    fn neighbors_never_dangle() {
        let blocked = |q: Point| (q.x + 2 * q.y) % 3 == 0;
        for adjacency in [Adjacency::Cardinal, Adjacency::All] {
            for policy in [BuildPolicy::TwoPass, BuildPolicy::SinglePass] {
                let g = TileGraph::from_fn(7, 4, blocked, GraphConfig { adjacency, policy });
                for n in g.nodes() {
                    assert!(!blocked(n.pos()));
                    for &id in n.neighbors() {
                        assert!(id.index() < g.len());
                        assert!(g.contains(g.node(id).pos()));
                    }
                }
            }
        }
    }

    #[test]
    fn rebuild_is_identical() {
        let blocked = |q: Point| q.x == 2 && q.y != 3;
        let cfg = GraphConfig::new(Adjacency::All);
        assert_eq!(TileGraph::from_fn(5, 5, blocked, cfg), TileGraph::from_fn(5, 5, blocked, cfg));
    }

    #[test]
    fn fully_blocked_is_empty() {
        let g = TileGraph::from_fn(4, 4, |_| true, GraphConfig::default());
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.neighbors(p(0, 0)).count(), 0);
    }

    #[test]
    fn zero_sized_source_is_empty() {
        let g = TileGraph::from_fn(0, 3, |_| false, GraphConfig::default());
        assert!(g.is_empty());
        assert!(g.range().is_empty());
    }

    #[test]
    fn graph_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TileGraph>();
    }
}
