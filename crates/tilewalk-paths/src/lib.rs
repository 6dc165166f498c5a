//! Walkability graphs and exploration paths for tile grids.
//!
//! This crate turns a [`TileSource`](tilewalk_core::TileSource) into a
//! [`TileGraph`] over its walkable cells and walks that graph depth-first to
//! produce an exploration [`Path`]:
//!
//! - **Graph construction** ([`TileGraph::build`]) with 4- or 8-directional
//!   [`Adjacency`] and a choice of [`BuildPolicy`]
//! - **Depth-first traversal** ([`TileGraph::dfs`], [`TileGraph::dfs_with`],
//!   [`TileGraph::dfs_checked`])
//!
//! Traversal order is fully determined by neighbor-list order, which in turn
//! is fixed by the adjacency direction order and the build policy:
//!
//! | Policy | Neighbor list order |
//! |---|---|
//! | [`BuildPolicy::TwoPass`] | direction order: left, right, up, down, then diagonals |
//! | [`BuildPolicy::SinglePass`] | earlier-created neighbors (direction order) first, then later ones by creation |
//!
//! ```
//! use tilewalk_core::Point;
//! use tilewalk_paths::{GraphConfig, TileGraph};
//!
//! let graph = TileGraph::from_fn(3, 1, |_| false, GraphConfig::default());
//! let path = graph.dfs(Point::new(0, 0));
//! assert_eq!(path.as_slice(), &[Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]);
//! ```

mod dfs;
mod graph;
mod neighbors;
mod path;

pub use graph::{BuildPolicy, GraphConfig, GraphNode, NodeId, TileGraph};
pub use neighbors::{Adjacency, Neighbors};
pub use path::{Path, PathError};
