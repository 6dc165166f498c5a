//! **tilewalk-core**: shared types for tile-grid walking.
//!
//! This crate provides the foundational types used across the *tilewalk*
//! workspace: grid geometry primitives and the [`TileSource`] abstraction
//! that graph construction reads walkability from.

pub mod geom;
pub mod tiles;

pub use geom::{Point, Range, RangeIter};
pub use tiles::{FnTiles, TileSource};
