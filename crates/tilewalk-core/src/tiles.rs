//! Tile sources: anything that can answer "is this cell blocked?".
//!
//! The [`TileSource`] trait is the only thing graph construction needs from
//! a map. A parsed tilemap layer, a procedurally generated grid, or a plain
//! closure (via [`FnTiles`]) can all serve as one.

use crate::{Point, Range};

/// A rectangular tile region `[0, width) × [0, height)` with per-cell
/// collision flags.
pub trait TileSource {
    /// Map extents in tiles (x = width, y = height).
    fn size(&self) -> Point;

    /// Whether the cell at `p` is impassable.
    ///
    /// Only called for points inside [`range`](Self::range).
    fn is_blocked(&self, p: Point) -> bool;

    /// The half-open region covered by this source.
    #[inline]
    fn range(&self) -> Range {
        let sz = self.size();
        Range::with_size(sz.x, sz.y)
    }

    /// Whether `p` is inside the map and not blocked. Points outside the
    /// map are never walkable and `is_blocked` is not consulted for them.
    #[inline]
    fn is_walkable(&self, p: Point) -> bool {
        self.range().contains(p) && !self.is_blocked(p)
    }
}

impl<T: TileSource + ?Sized> TileSource for &T {
    fn size(&self) -> Point {
        (**self).size()
    }

    fn is_blocked(&self, p: Point) -> bool {
        (**self).is_blocked(p)
    }
}

/// A [`TileSource`] backed by a closure reporting blocked cells.
#[derive(Clone, Copy)]
pub struct FnTiles<F> {
    size: Point,
    blocked: F,
}

impl<F: Fn(Point) -> bool> FnTiles<F> {
    /// Create a `width × height` source where `blocked(p)` marks impassable
    /// cells.
    pub fn new(width: i32, height: i32, blocked: F) -> Self {
        Self {
            size: Point::new(width, height),
            blocked,
        }
    }
}

impl<F: Fn(Point) -> bool> TileSource for FnTiles<F> {
    fn size(&self) -> Point {
        self.size
    }

    fn is_blocked(&self, p: Point) -> bool {
        (self.blocked)(p)
    }
}
