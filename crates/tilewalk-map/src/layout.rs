//! Maps written as ASCII art.
//!
//! A [`Layout`] parses a block of text, one character per tile, and turns it
//! into a [`TileLayer`] through a [`Legend`].

use std::fmt;

use tilewalk_core::Point;

use crate::layer::{TileId, TileLayer};

/// Wall tile id used by [`Legend::standard`].
pub const WALL: TileId = TileId(1);
/// Floor tile id used by [`Legend::standard`].
pub const FLOOR: TileId = TileId(0);

/// Character to tile mapping, with the subset of tiles that collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    glyphs: Vec<(char, TileId)>,
    collision: Vec<TileId>,
}

impl Legend {
    /// An empty legend.
    pub fn new() -> Self {
        Self {
            glyphs: Vec::new(),
            collision: Vec::new(),
        }
    }

    /// `'#'` is a colliding [`WALL`], `'.'` is a [`FLOOR`].
    pub fn standard() -> Self {
        Self::new().glyph('#', WALL).glyph('.', FLOOR).colliding(WALL)
    }

    /// Map `ch` to `id`. A later mapping for the same char wins.
    pub fn glyph(mut self, ch: char, id: TileId) -> Self {
        self.glyphs.retain(|&(c, _)| c != ch);
        self.glyphs.push((ch, id));
        self
    }

    /// Mark `id` as colliding.
    pub fn colliding(mut self, id: TileId) -> Self {
        if !self.collision.contains(&id) {
            self.collision.push(id);
        }
        self
    }

    /// Tile id for `ch`.
    pub fn tile(&self, ch: char) -> Option<TileId> {
        self.glyphs.iter().find(|&&(c, _)| c == ch).map(|&(_, id)| id)
    }

    /// Characters the legend knows about.
    pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.iter().map(|&(c, _)| c)
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::standard()
    }
}

/// A rectangular block of map text.
///
/// Lines are separated by `'\n'` and must all have the same width.
/// Surrounding whitespace of the whole block is trimmed, but not that of
/// individual lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Vec<char>>,
    size: Point,
}

impl Layout {
    /// Parse a layout.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LayoutError::Empty);
        }
        let rows: Vec<Vec<char>> = s.lines().map(|l| l.chars().collect()).collect();
        let width = rows[0].len();
        if let Some(y) = rows.iter().position(|r| r.len() != width) {
            return Err(LayoutError::InconsistentSize {
                line: y,
                expected: width,
                found: rows[y].len(),
            });
        }
        let size = Point::new(width as i32, rows.len() as i32);
        Ok(Self { rows, size })
    }

    /// (width, height) in tiles.
    pub fn size(&self) -> Point {
        self.size
    }

    /// Character at `p`, if inside the layout.
    pub fn glyph(&self, p: Point) -> Option<char> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        self.rows.get(p.y as usize)?.get(p.x as usize).copied()
    }

    /// Call `f` for each position and character in row-major order.
    pub fn iter(&self, mut f: impl FnMut(Point, char)) {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &ch) in row.iter().enumerate() {
                f(Point::new(x as i32, y as i32), ch);
            }
        }
    }

    /// First position holding `ch`, scanning row-major.
    pub fn find(&self, ch: char) -> Option<Point> {
        let mut found = None;
        self.iter(|p, c| {
            if found.is_none() && c == ch {
                found = Some(p);
            }
        });
        found
    }

    /// Build a tile layer. Every character must be in `legend`.
    pub fn to_layer(&self, legend: &Legend) -> Result<TileLayer, LayoutError> {
        let mut layer = TileLayer::new(self.size.x, self.size.y);
        let mut err = None;
        self.iter(|p, ch| {
            if err.is_some() {
                return;
            }
            match legend.tile(ch) {
                Some(id) => layer.set(p, id),
                None => err = Some(LayoutError::UnknownGlyph { ch, pos: p }),
            }
        });
        if let Some(e) = err {
            return Err(e);
        }
        layer.set_collision(&legend.collision);
        Ok(layer)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for ch in row {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a layout or converting it to tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Nothing but whitespace.
    Empty,
    /// A line's width differs from the first line's.
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character with no legend entry.
    UnknownGlyph { ch: char, pos: Point },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout: empty"),
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout: line {line} is {found} tiles wide, expected {expected}"
            ),
            Self::UnknownGlyph { ch, pos } => {
                write!(f, "layout: unknown glyph \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
