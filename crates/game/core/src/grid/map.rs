use arrayvec::ArrayVec;

use super::{Cell, Direction};
use crate::error::{ErrorSeverity, GameError};

/// Static map oracle exposing immutable layout information.
///
/// Visibility and path planning are generic over this trait so levels can be
/// served from any backing store; [`GridMap`] is the canonical implementation.
pub trait MapOracle {
    fn dimensions(&self) -> MapDimensions;

    /// Returns the terrain at `cell`, or `None` outside the grid.
    fn tile(&self, cell: Cell) -> Option<TerrainKind>;

    fn in_bounds(&self, cell: Cell) -> bool {
        self.dimensions().contains(cell)
    }

    /// Out-of-bounds cells are never walkable.
    fn is_walkable(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(TerrainKind::is_walkable)
    }

    /// The in-bounds orthogonal neighbors of `cell`, in [`Direction::ALL`] order.
    ///
    /// Walls are included; callers filter with [`MapOracle::is_walkable`].
    fn neighbors4(&self, cell: Cell) -> ArrayVec<Cell, 4> {
        Direction::ALL
            .iter()
            .map(|&direction| cell.step(direction))
            .filter(|&next| self.in_bounds(next))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

/// Terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
}

impl TerrainKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    /// ASCII glyph used by layouts: `#` for walls, `.` for floor.
    pub const fn glyph(self) -> char {
        match self {
            TerrainKind::Floor => '.',
            TerrainKind::Wall => '#',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("expected {expected} tiles for the grid, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    #[error("layout row {row} has width {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDimensions { .. } => "GRID_EMPTY_DIMENSIONS",
            Self::TileCountMismatch { .. } => "GRID_TILE_COUNT_MISMATCH",
            Self::RaggedRow { .. } => "GRID_RAGGED_ROW",
        }
    }
}

/// Fixed-size level layout.
///
/// Dimensions are fixed at construction and there is no API to resize or
/// edit tiles afterwards, so a map shared between agents never changes
/// under them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
}

impl GridMap {
    /// Builds a map from row-major tiles.
    pub fn new(dimensions: MapDimensions, tiles: Vec<TerrainKind>) -> Result<Self, GridError> {
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(GridError::EmptyDimensions {
                width: dimensions.width,
                height: dimensions.height,
            });
        }
        if tiles.len() != dimensions.area() {
            return Err(GridError::TileCountMismatch {
                expected: dimensions.area(),
                actual: tiles.len(),
            });
        }
        Ok(Self { dimensions, tiles })
    }

    pub fn filled(dimensions: MapDimensions, terrain: TerrainKind) -> Result<Self, GridError> {
        Self::new(dimensions, vec![terrain; dimensions.area()])
    }

    /// Builds a map from a closure evaluated once per cell.
    pub fn from_fn(
        dimensions: MapDimensions,
        mut terrain: impl FnMut(Cell) -> TerrainKind,
    ) -> Result<Self, GridError> {
        let tiles = dimensions.cells().map(&mut terrain).collect();
        Self::new(dimensions, tiles)
    }

    /// Parses an ASCII layout where `#` is a wall and any other glyph is floor.
    pub fn from_ascii<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            tiles.extend(line.chars().map(|glyph| match glyph {
                '#' => TerrainKind::Wall,
                _ => TerrainKind::Floor,
            }));
        }
        Self::new(MapDimensions::new(width as u32, rows.len() as u32), tiles)
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// Renders the terrain back into ASCII rows.
    pub fn to_ascii(&self) -> Vec<String> {
        self.tiles
            .chunks(self.dimensions.width as usize)
            .map(|row| row.iter().map(|tile| tile.glyph()).collect())
            .collect()
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, cell: Cell) -> Option<TerrainKind> {
        self.dimensions
            .index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> GridMap {
        GridMap::from_ascii(&["#####", "#...#", "#.#.#", "#####"]).unwrap()
    }

    #[test]
    fn parses_ascii_layout() {
        let map = room();
        assert_eq!(map.dimensions(), MapDimensions::new(5, 4));
        assert!(map.is_walkable(Cell::new(1, 1)));
        assert!(!map.is_walkable(Cell::new(2, 2)));
        assert!(!map.is_walkable(Cell::new(0, 0)));
        assert_eq!(map.to_ascii(), vec!["#####", "#...#", "#.#.#", "#####"]);
    }

    #[test]
    fn out_of_bounds_is_not_walkable() {
        let map = room();
        assert!(!map.in_bounds(Cell::new(-1, 0)));
        assert!(!map.in_bounds(Cell::new(5, 0)));
        assert!(!map.is_walkable(Cell::new(1, 9)));
        assert_eq!(map.tile(Cell::new(0, 4)), None);
    }

    #[test]
    fn neighbors_are_orthogonal_and_in_bounds() {
        let map = room();
        let corner: Vec<_> = map.neighbors4(Cell::new(0, 0)).into_iter().collect();
        assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(0, 1)]);

        let inner: Vec<_> = map.neighbors4(Cell::new(2, 1)).into_iter().collect();
        assert_eq!(
            inner,
            vec![
                Cell::new(2, 0),
                Cell::new(3, 1),
                Cell::new(2, 2),
                Cell::new(1, 1)
            ]
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            GridMap::new(MapDimensions::new(2, 2), vec![TerrainKind::Floor; 3]),
            Err(GridError::TileCountMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(matches!(
            GridMap::filled(MapDimensions::new(0, 3), TerrainKind::Floor),
            Err(GridError::EmptyDimensions { .. })
        ));
        assert!(matches!(
            GridMap::from_ascii(&["###", "##"]),
            Err(GridError::RaggedRow { row: 1, .. })
        ));
    }
}
