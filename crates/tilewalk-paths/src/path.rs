use std::fmt;
use std::ops::Index;

use tilewalk_core::Point;

/// An ordered, immutable sequence of grid coordinates produced by one
/// traversal.
///
/// Consumers index into it with a cursor they own; the path itself never
/// changes after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The coordinate at step `i`.
    #[inline]
    pub fn get(&self, i: usize) -> Option<Point> {
        self.points.get(i).copied()
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Step index of `p`, if the path visits it.
    pub fn position(&self, p: Point) -> Option<usize> {
        self.points.iter().position(|&q| q == p)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }
}

impl From<Vec<Point>> for Path {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.points
    }
}

impl Index<usize> for Path {
    type Output = Point;

    fn index(&self, i: usize) -> &Point {
        &self.points[i]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = Point;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Point>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter().copied()
    }
}

/// Errors reported by the strict traversal entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The start coordinate is blocked or outside the map.
    InvalidStart(Point),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart(p) => write!(f, "invalid start position {p}: not a walkable cell"),
        }
    }
}

impl std::error::Error for PathError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_serializes_as_point_list() {
        let path = Path::from(vec![Point::new(0, 0), Point::new(1, 0)]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"[{"x":0,"y":0},{"x":1,"y":0}]"#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
