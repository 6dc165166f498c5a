//! A single tile layer with a collision set.
//!
//! [`TileId`] is a newtype over `u32` naming a tile in a tileset.
//! [`TileLayer`] stores one id per cell and a set of ids that collide; it
//! is the usual [`TileSource`] fed into graph construction.

use tilewalk_core::{Point, Range, TileSource};

/// A tileset index.
///
/// What each id looks like is up to the renderer; the layer only cares
/// whether an id is in its collision set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub u32);

impl TileId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for TileId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A width × height grid of [`TileId`]s with per-id collision flags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileLayer {
    tiles: Vec<TileId>,
    width: i32,
    height: i32,
    // Sorted, deduplicated.
    collision: Vec<TileId>,
}

impl TileLayer {
    /// Create a new layer filled with `TileId(0)` and no colliding ids.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            tiles: vec![TileId::default(); (width * height) as usize],
            width,
            height,
            collision: Vec::new(),
        }
    }

    /// Returns the bounding range of the layer.
    pub fn bounds(&self) -> Range {
        Range::with_size(self.width, self.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Mark the given ids as colliding, replacing any previous set.
    pub fn set_collision(&mut self, ids: &[TileId]) {
        self.collision = ids.to_vec();
        self.collision.sort_unstable();
        self.collision.dedup();
    }

    /// Whether tiles with this id collide.
    pub fn collides(&self, id: TileId) -> bool {
        self.collision.binary_search(&id).is_ok()
    }

    /// The colliding ids, sorted.
    pub fn collision(&self) -> &[TileId] {
        &self.collision
    }

    /// Get the tile at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<TileId> {
        let i = self.bounds().index_of(p)?;
        Some(self.tiles[i])
    }

    /// Set the tile at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, id: TileId) {
        if let Some(i) = self.bounds().index_of(p) {
            self.tiles[i] = id;
        }
    }

    /// Fill the whole layer with `id`.
    pub fn fill(&mut self, id: TileId) {
        self.tiles.fill(id);
    }

    /// Fill the layer using a function of each point.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> TileId) {
        for (p, slot) in self.bounds().iter().zip(self.tiles.iter_mut()) {
            *slot = f(p);
        }
    }

    /// Count how many cells hold `id`.
    pub fn count(&self, id: TileId) -> usize {
        self.tiles.iter().filter(|&&t| t == id).count()
    }

    /// Iterate over `(Point, TileId)` pairs in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Point, TileId)> + '_ {
        self.bounds().iter().zip(self.tiles.iter().copied())
    }
}

impl TileSource for TileLayer {
    fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    fn is_blocked(&self, p: Point) -> bool {
        self.at(p).is_none_or(|id| self.collides(id))
    }
}
