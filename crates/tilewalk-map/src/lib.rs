//! Tile maps for tilewalk: collision-aware tile layers and ASCII layouts.

pub mod layer;
pub mod layout;

pub use layer::{TileId, TileLayer};
pub use layout::{FLOOR, Layout, LayoutError, Legend, WALL};
