//! Tile map storage and small geometry helpers for field-of-view tools.

mod ascii_map;
pub use ascii_map::{AsciiMap, WALL};

mod bitmap;
pub use bitmap::bitmap_len;

mod geom;
pub use geom::Angle;

mod grid;
pub use grid::{area, row_major, Cell, Grid};

/// Set with an efficient hash function.
pub use rustc_hash::FxHashSet as HashSet;
