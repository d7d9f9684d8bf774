//! Grid geometry and the static level layout.
mod cell;
mod map;

pub use cell::{Cell, Delta, Direction};
pub use map::{GridError, GridMap, MapDimensions, MapOracle, TerrainKind};
