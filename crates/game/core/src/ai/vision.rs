//! Line-of-sight checks.
//!
//! Vision is a circle of `radius` tiles (Euclidean) around the observer, cut by
//! walls. A wall anywhere strictly between observer and target blocks the view
//! completely; the endpoints themselves are never tested.

use crate::grid::{Cell, MapOracle};

/// Outcome of a single visibility query. Only meaningful for the tick it was
/// computed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityResult {
    pub visible: bool,
    pub target: Cell,
}

/// Returns true when `observer` has an unobstructed view of `target`.
///
/// Out-of-bounds endpoints fail closed.
pub fn can_see<M>(map: &M, observer: Cell, target: Cell, radius: u32) -> bool
where
    M: MapOracle + ?Sized,
{
    if !map.in_bounds(observer) || !map.in_bounds(target) {
        return false;
    }
    let radius = u64::from(radius);
    if observer.distance_squared(target) > radius * radius {
        return false;
    }

    let line = line_of_sight(observer, target);
    let interior = line.len().saturating_sub(1);
    line.iter()
        .take(interior)
        .skip(1)
        .all(|&cell| map.is_walkable(cell))
}

pub fn observe<M>(map: &M, observer: Cell, target: Cell, radius: u32) -> VisibilityResult
where
    M: MapOracle + ?Sized,
{
    VisibilityResult {
        visible: can_see(map, observer, target, radius),
        target,
    }
}

/// Rasterizes the segment from `from` to `to`, endpoints included.
///
/// The line is always traced from the smaller endpoint, so
/// `line_of_sight(a, b)` is `line_of_sight(b, a)` reversed and visibility does
/// not depend on who is looking at whom.
pub fn line_of_sight(from: Cell, to: Cell) -> Vec<Cell> {
    if from <= to {
        bresenham(from, to)
    } else {
        let mut line = bresenham(to, from);
        line.reverse();
        line
    }
}

fn bresenham(from: Cell, to: Cell) -> Vec<Cell> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let step_x = if from.x < to.x { 1 } else { -1 };
    let step_y = if from.y < to.y { 1 } else { -1 };

    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);
    let mut error = dx + dy;
    let mut cursor = from;
    loop {
        cells.push(cursor);
        if cursor == to {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            cursor.x += step_x;
        }
        if doubled <= dx {
            error += dx;
            cursor.y += step_y;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridMap;

    fn corridor() -> GridMap {
        GridMap::from_ascii(&[
            "############",
            "#..........#",
            "#....#.....#",
            "#..........#",
            "############",
        ])
        .unwrap()
    }

    #[test]
    fn sees_along_open_corridor() {
        let map = corridor();
        assert!(can_see(&map, Cell::new(1, 1), Cell::new(7, 1), 6));
    }

    #[test]
    fn radius_is_euclidean() {
        let map = corridor();
        // 6 columns away: exactly on the circle.
        assert!(can_see(&map, Cell::new(1, 1), Cell::new(7, 1), 6));
        assert!(!can_see(&map, Cell::new(1, 1), Cell::new(8, 1), 6));
        // dx = 5, dy = 2: sqrt(29) < 6 but Chebyshev and Manhattan disagree.
        assert!(can_see(&map, Cell::new(1, 1), Cell::new(6, 3), 6));
        assert!(!can_see(&map, Cell::new(1, 1), Cell::new(6, 3), 5));
    }

    #[test]
    fn walls_block_sight() {
        let map = corridor();
        assert!(!can_see(&map, Cell::new(3, 2), Cell::new(8, 2), 6));
        assert!(can_see(&map, Cell::new(3, 1), Cell::new(8, 1), 6));
    }

    #[test]
    fn endpoints_are_not_occluders() {
        let map = corridor();
        // Target standing "in" the pillar cell is still visible; the pillar is the endpoint.
        assert!(can_see(&map, Cell::new(2, 2), Cell::new(5, 2), 6));
    }

    #[test]
    fn out_of_bounds_fails_closed() {
        let map = corridor();
        assert!(!can_see(&map, Cell::new(1, 1), Cell::new(-1, 1), 6));
        assert!(!can_see(&map, Cell::new(20, 1), Cell::new(1, 1), 30));
    }

    #[test]
    fn visibility_is_symmetric() {
        let map = GridMap::from_ascii(&[
            "#########",
            "#...#...#",
            "#.#...#.#",
            "#...#...#",
            "#.#...#.#",
            "#########",
        ])
        .unwrap();
        let cells: Vec<Cell> = map
            .dimensions()
            .cells()
            .filter(|&cell| map.is_walkable(cell))
            .collect();
        for &a in &cells {
            for &b in &cells {
                assert_eq!(
                    can_see(&map, a, b, 6),
                    can_see(&map, b, a, 6),
                    "asymmetric view between {a} and {b}"
                );
            }
        }
    }

    #[test]
    fn line_is_direction_independent() {
        let a = Cell::new(1, 1);
        let b = Cell::new(6, 3);
        let mut reversed = line_of_sight(b, a);
        reversed.reverse();
        assert_eq!(line_of_sight(a, b), reversed);
        assert_eq!(line_of_sight(a, b).first(), Some(&a));
        assert_eq!(line_of_sight(a, b).last(), Some(&b));
        assert_eq!(line_of_sight(a, a), vec![a]);
    }

    #[test]
    fn observe_reports_target() {
        let map = corridor();
        let result = observe(&map, Cell::new(1, 1), Cell::new(3, 1), 6);
        assert_eq!(
            result,
            VisibilityResult {
                visible: true,
                target: Cell::new(3, 1)
            }
        );
    }
}
