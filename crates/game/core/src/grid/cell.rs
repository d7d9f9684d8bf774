use std::fmt;

/// Discrete grid position expressed as (column, row) tile coordinates.
///
/// Rows grow downward, matching the screen layout of the handheld frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Taxicab distance, the exact step count on an open 4-connected grid.
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Squared Euclidean distance. Kept integral so radius checks stay exact.
    pub fn distance_squared(self, other: Cell) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }

    /// Returns true when `other` is one orthogonal step away.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal movement direction. There is no diagonal movement on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed enumeration order shared by neighbor queries and the planner.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Movement observed over one simulation step, in cells per axis.
///
/// A dash can cover more than one cell, so components are not limited to
/// `-1..=1`; use [`Delta::unit`] for a one-cell look-ahead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn between(from: Cell, to: Cell) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    /// Clamps each component to `-1..=1`.
    #[must_use]
    pub fn unit(self) -> Self {
        Self::new(self.dx.signum(), self.dy.signum())
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

impl From<Direction> for Delta {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(dx, dy)
    }
}

impl From<(i32, i32)> for Delta {
    fn from((dx, dy): (i32, i32)) -> Self {
        Self::new(dx, dy)
    }
}

impl std::ops::Add for Delta {
    type Output = Delta;

    fn add(self, rhs: Delta) -> Delta {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl std::ops::AddAssign for Delta {
    fn add_assign(&mut self, rhs: Delta) {
        *self = *self + rhs;
    }
}

impl std::ops::Add<Delta> for Cell {
    type Output = Cell;

    fn add(self, rhs: Delta) -> Cell {
        self.offset(rhs.dx, rhs.dy)
    }
}
