//! A* path planning on the 4-connected grid.
//!
//! Every step costs one and the heuristic is the Manhattan distance, which is
//! admissible and consistent here, so the first time the goal is popped the
//! path is a shortest one. The open set is ordered by `f`, then by lower `h`,
//! then by insertion order; together with the fixed neighbor order of
//! [`Direction::ALL`](crate::grid::Direction::ALL) this makes results
//! reproducible across runs.
//!
//! The planner keeps no state between calls. Deciding when to replan is up to
//! the caller.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{ErrorSeverity, GameError};
use crate::grid::{Cell, MapOracle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path start {start} is outside the grid")]
    StartOutOfBounds { start: Cell },

    #[error("path goal {goal} is outside the grid")]
    GoalOutOfBounds { goal: Cell },
}

impl GameError for PathError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StartOutOfBounds { .. } => "PATH_START_OUT_OF_BOUNDS",
            Self::GoalOutOfBounds { .. } => "PATH_GOAL_OUT_OF_BOUNDS",
        }
    }
}

/// Walkable route from a start cell (exclusive) to a goal cell (inclusive).
///
/// An empty path means the start already is the goal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Cell>,
}

impl Path {
    pub fn new(steps: Vec<Cell>) -> Self {
        Self { steps }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Cell] {
        &self.steps
    }

    /// The cell to move into next.
    pub fn first(&self) -> Option<Cell> {
        self.steps.first().copied()
    }

    pub fn goal(&self) -> Option<Cell> {
        self.steps.last().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<Cell> {
        self.steps
    }
}

/// Outcome of a planning call: `None` when the goal cannot be reached.
pub type PathResult = Option<Path>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    h: u32,
    seq: u64,
    cell: Cell,
}

impl Ord for OpenNode {
    // BinaryHeap is a max-heap; invert so the smallest key pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.f, other.h, other.seq).cmp(&(self.f, self.h, self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a shortest walkable path from `start` to `goal`.
///
/// # Errors
///
/// Returns [`PathError`] when either endpoint lies outside the grid. A goal on
/// a wall, or one separated from the start by walls, is not an error and
/// yields `Ok(None)`.
pub fn find_path<M>(map: &M, start: Cell, goal: Cell) -> Result<PathResult, PathError>
where
    M: MapOracle + ?Sized,
{
    let dimensions = map.dimensions();
    let start_index = dimensions
        .index(start)
        .ok_or(PathError::StartOutOfBounds { start })?;
    if !dimensions.contains(goal) {
        return Err(PathError::GoalOutOfBounds { goal });
    }

    if start == goal {
        return Ok(Some(Path::empty()));
    }
    if !map.is_walkable(goal) {
        return Ok(None);
    }

    let area = dimensions.area();
    let mut g_score = vec![u32::MAX; area];
    let mut came_from: Vec<Option<Cell>> = vec![None; area];
    let mut closed = vec![false; area];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;

    g_score[start_index] = 0;
    let h = start.manhattan(goal);
    open.push(OpenNode {
        f: h,
        h,
        seq,
        cell: start,
    });

    while let Some(node) = open.pop() {
        let Some(index) = dimensions.index(node.cell) else {
            continue;
        };
        // Lazy deletion: stale heap entries for already-expanded cells.
        if closed[index] {
            continue;
        }
        closed[index] = true;

        if node.cell == goal {
            return Ok(Some(reconstruct(&came_from, dimensions, start, goal)));
        }

        let tentative = g_score[index] + 1;
        for next in map.neighbors4(node.cell) {
            if !map.is_walkable(next) {
                continue;
            }
            let Some(next_index) = dimensions.index(next) else {
                continue;
            };
            if closed[next_index] || tentative >= g_score[next_index] {
                continue;
            }
            g_score[next_index] = tentative;
            came_from[next_index] = Some(node.cell);
            seq += 1;
            let h = next.manhattan(goal);
            open.push(OpenNode {
                f: tentative + h,
                h,
                seq,
                cell: next,
            });
        }
    }

    Ok(None)
}

fn reconstruct(
    came_from: &[Option<Cell>],
    dimensions: crate::grid::MapDimensions,
    start: Cell,
    goal: Cell,
) -> Path {
    let mut steps = vec![goal];
    let mut cursor = goal;
    while let Some(previous) = dimensions
        .index(cursor)
        .and_then(|index| came_from[index])
    {
        if previous == start {
            break;
        }
        steps.push(previous);
        cursor = previous;
    }
    steps.reverse();
    Path::new(steps)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::grid::GridMap;

    fn maze() -> GridMap {
        GridMap::from_ascii(&[
            "##########",
            "#....#...#",
            "#.##.#.#.#",
            "#.#..#.#.#",
            "#.#.##.#.#",
            "#...#..#.#",
            "###...##.#",
            "#........#",
            "##########",
        ])
        .unwrap()
    }

    fn bfs_distance(map: &GridMap, start: Cell, goal: Cell) -> Option<usize> {
        let dimensions = map.dimensions();
        let mut distance = vec![None; dimensions.area()];
        let mut queue = VecDeque::new();
        distance[dimensions.index(start)?] = Some(0);
        queue.push_back(start);
        while let Some(cell) = queue.pop_front() {
            let current = distance[dimensions.index(cell)?]?;
            if cell == goal {
                return Some(current);
            }
            for next in map.neighbors4(cell) {
                let index = dimensions.index(next)?;
                if map.is_walkable(next) && distance[index].is_none() {
                    distance[index] = Some(current + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    fn assert_valid(map: &GridMap, start: Cell, path: &Path) {
        let mut previous = start;
        for &step in path.iter() {
            assert!(previous.is_adjacent(step), "{previous} -> {step} is not a step");
            assert!(map.is_walkable(step), "{step} is not walkable");
            previous = step;
        }
    }

    #[test]
    fn matches_bfs_on_every_pair() {
        let map = maze();
        let walkable: Vec<Cell> = map
            .dimensions()
            .cells()
            .filter(|&cell| map.is_walkable(cell))
            .collect();

        for &start in &walkable {
            for &goal in &walkable {
                let expected = bfs_distance(&map, start, goal);
                let found = find_path(&map, start, goal).unwrap();
                assert_eq!(found.as_ref().map(Path::len), expected, "{start} -> {goal}");
                if let Some(path) = found {
                    assert_valid(&map, start, &path);
                    if !path.is_empty() {
                        assert_eq!(path.goal(), Some(goal));
                    }
                }
            }
        }
    }

    #[test]
    fn repeated_calls_return_identical_paths() {
        let map = maze();
        let first = find_path(&map, Cell::new(1, 1), Cell::new(8, 7)).unwrap();
        for _ in 0..10 {
            assert_eq!(find_path(&map, Cell::new(1, 1), Cell::new(8, 7)).unwrap(), first);
        }
    }

    #[test]
    fn ties_prefer_lower_heuristic_then_insertion_order() {
        let map = GridMap::from_ascii(&["...", "...", "..."]).unwrap();
        let path = find_path(&map, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap()
            .unwrap();
        assert_eq!(
            path.steps(),
            &[
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(2, 1),
                Cell::new(2, 2)
            ]
        );
    }

    #[test]
    fn walled_in_goal_has_no_path() {
        let map = GridMap::from_ascii(&[".....", ".###.", ".#.#.", ".###.", "....."]).unwrap();
        assert_eq!(find_path(&map, Cell::new(0, 0), Cell::new(2, 2)).unwrap(), None);
        assert_eq!(find_path(&map, Cell::new(2, 2), Cell::new(0, 0)).unwrap(), None);
    }

    #[test]
    fn wall_goal_has_no_path() {
        let map = maze();
        assert_eq!(find_path(&map, Cell::new(1, 1), Cell::new(5, 1)).unwrap(), None);
    }

    #[test]
    fn start_equal_to_goal_is_empty() {
        let map = maze();
        let path = find_path(&map, Cell::new(1, 1), Cell::new(1, 1)).unwrap().unwrap();
        assert!(path.is_empty());
        assert_eq!(path.first(), None);
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let map = maze();
        assert_eq!(
            find_path(&map, Cell::new(-1, 1), Cell::new(1, 1)),
            Err(PathError::StartOutOfBounds {
                start: Cell::new(-1, 1)
            })
        );
        let err = find_path(&map, Cell::new(1, 1), Cell::new(1, 40)).unwrap_err();
        assert_eq!(err.error_code(), "PATH_GOAL_OUT_OF_BOUNDS");
        assert!(err.severity().is_recoverable());
    }
}
