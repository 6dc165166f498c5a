use tilewalk_core::Point;

/// Which directions count as adjacent when building a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Adjacency {
    /// 4-directional: left, right, up, down.
    #[default]
    Cardinal,
    /// 8-directional: the cardinal directions followed by up-left,
    /// up-right, down-left, down-right.
    All,
}

// Order matters: it decides neighbor-list order and therefore the
// traversal order of every search over the graph.
static DIRS: [Point; 8] = [
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(1, 1),
];

impl Adjacency {
    /// Direction offsets in the order they are tested.
    #[inline]
    pub fn directions(self) -> &'static [Point] {
        match self {
            Adjacency::Cardinal => &DIRS[..4],
            Adjacency::All => &DIRS,
        }
    }
}

/// Cached neighbor computation helper.
///
/// Enumerates the neighbors of a grid point for an [`Adjacency`] mode,
/// filtered by a predicate, reusing one buffer across calls.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the neighbors of `p` under `adjacency`, in direction order,
    /// keeping only those for which `keep` returns `true`.
    pub fn of(&mut self, p: Point, adjacency: Adjacency, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for &d in adjacency.directions() {
            let n = p + d;
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
