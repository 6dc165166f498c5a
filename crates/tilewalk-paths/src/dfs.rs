//! Depth-first exploration over a [`TileGraph`].

use tilewalk_core::Point;

use crate::graph::TileGraph;
use crate::path::{Path, PathError};

impl TileGraph {
    /// Walk the graph depth-first from `start`, calling `visit` once per
    /// reachable node in visitation order. Returns the number of visits.
    ///
    /// Nodes are recorded when popped, and each popped node pushes its
    /// unvisited neighbors in list order, so the last neighbor in a list is
    /// explored first. A node may sit on the stack several times; only its
    /// first pop counts. If `start` is not a node nothing is visited.
    pub fn dfs_with(&self, start: Point, mut visit: impl FnMut(Point)) -> usize {
        let Some(sid) = self.node_id(start) else {
            log::trace!("dfs: start {start} is not a node");
            return 0;
        };

        let mut visited = vec![false; self.len()];
        let mut stack = vec![sid];
        let mut count = 0;

        while let Some(id) = stack.pop() {
            if visited[id.index()] {
                continue;
            }
            visited[id.index()] = true;
            let node = self.node(id);
            visit(node.pos());
            count += 1;

            for &n in node.neighbors() {
                if !visited[n.index()] {
                    stack.push(n);
                }
            }
        }

        log::trace!("dfs from {start}: {count} of {} nodes", self.len());
        count
    }

    /// Depth-first visitation order from `start`.
    ///
    /// Returns an empty path if `start` is blocked or outside the graph; use
    /// [`dfs_checked`](Self::dfs_checked) to treat that as an error.
    pub fn dfs(&self, start: Point) -> Path {
        let mut points = Vec::new();
        self.dfs_with(start, |p| points.push(p));
        Path::from(points)
    }

    /// Like [`dfs`](Self::dfs), but fails if `start` is not a node.
    pub fn dfs_checked(&self, start: Point) -> Result<Path, PathError> {
        if !self.contains(start) {
            return Err(PathError::InvalidStart(start));
        }
        Ok(self.dfs(start))
    }
}
