//! Extraction of a region's edge tiles in walk order.

use crate::grid::TileGrid;
use crate::region::Region;
use crate::tile::{Coord, Tile};

const UNMARKED: u8 = 0;
const PENDING: u8 = 1;
const VISITED: u8 = 2;

/// Returns `true` if `coord` is a floor tile with an orthogonal wall
/// neighbour inside the grid.
pub fn is_edge_tile(grid: &TileGrid, coord: Coord) -> bool {
    grid.get_coord(coord) == Some(Tile::Floor)
        && Coord::ORTHOGONAL
            .iter()
            .any(|&d| grid.get_coord(coord.offset(d)) == Some(Tile::Wall))
}

/// Returns `true` if a diagonal step `from → to` stays inside one region:
/// at least one of the two orthogonal tiles shared by both ends is floor.
///
/// Two floor tiles touching only at a corner between two walls belong to
/// different regions; stepping across that corner would leak the walk out
/// of its region.
pub fn is_valid_diagonal_step(grid: &TileGrid, from: Coord, to: Coord) -> bool {
    debug_assert!(from.x.abs_diff(to.x) == 1 && from.y.abs_diff(to.y) == 1);
    grid.is(to.x, from.y, Tile::Floor) || grid.is(from.x, to.y, Tile::Floor)
}

/// Orders the edge tiles of regions by a depth-first walk along the rim.
///
/// The walk prefers orthogonal steps and falls back to validated diagonal
/// steps, backtracking when stuck. Rims with holes or pinches produce an
/// order with occasional jumps; the nearest-pair search tolerates that.
///
/// The marking buffer covers the whole grid and is reused across regions
/// of one grid. Only the tiles of the region being walked are touched, and
/// they are reset before [`EdgeTileExtractor::extract`] returns.
pub struct EdgeTileExtractor {
    marks: Vec<u8>,
}

impl EdgeTileExtractor {
    /// Allocates a marking buffer sized for `grid`.
    pub fn new(grid: &TileGrid) -> Self {
        Self {
            marks: vec![UNMARKED; grid.area()],
        }
    }

    /// Returns every edge tile of `region`, ordered by the rim walk.
    ///
    /// # Panics
    ///
    /// Panics if `region` is empty, or if the buffer was built for a grid of
    /// a different size.
    pub fn extract(&mut self, grid: &TileGrid, region: &Region) -> Vec<Coord> {
        assert!(!region.is_empty(), "edge tiles of an empty region");
        assert_eq!(self.marks.len(), grid.area(), "extractor built for another grid");

        let mut pending = 0;
        for coord in region.iter() {
            if is_edge_tile(grid, coord) {
                self.marks[grid.linear_index(coord.x, coord.y)] = PENDING;
                pending += 1;
            }
        }

        let mut ordered = Vec::with_capacity(pending);
        let mut stack = Vec::new();
        for seed in region.iter() {
            if ordered.len() == pending {
                break;
            }
            if self.marks[grid.linear_index(seed.x, seed.y)] != PENDING {
                continue;
            }
            self.visit(grid, seed, &mut ordered, &mut stack);
            while let Some(&current) = stack.last() {
                match self.next_step(grid, current) {
                    Some(next) => self.visit(grid, next, &mut ordered, &mut stack),
                    None => {
                        stack.pop();
                    }
                }
            }
        }

        for coord in region.iter() {
            self.marks[grid.linear_index(coord.x, coord.y)] = UNMARKED;
        }
        ordered
    }

    fn visit(&mut self, grid: &TileGrid, coord: Coord, ordered: &mut Vec<Coord>, stack: &mut Vec<Coord>) {
        self.marks[grid.linear_index(coord.x, coord.y)] = VISITED;
        ordered.push(coord);
        stack.push(coord);
    }

    fn is_pending(&self, grid: &TileGrid, coord: Coord) -> bool {
        grid.contains_coord(coord) && self.marks[grid.linear_index(coord.x, coord.y)] == PENDING
    }

    fn next_step(&self, grid: &TileGrid, current: Coord) -> Option<Coord> {
        Coord::ORTHOGONAL
            .iter()
            .map(|&d| current.offset(d))
            .find(|&n| self.is_pending(grid, n))
            .or_else(|| {
                Coord::DIAGONAL
                    .iter()
                    .map(|&d| current.offset(d))
                    .find(|&n| self.is_pending(grid, n) && is_valid_diagonal_step(grid, current, n))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::find_regions;

    fn room_grid() -> TileGrid {
        TileGrid::from_ascii(&[
            "#######",
            "#.....#",
            "#.....#",
            "#.....#",
            "#######",
        ])
        .unwrap()
    }

    #[test]
    fn test_edge_tiles_are_rim_of_room() {
        let grid = room_grid();
        let regions = find_regions(&grid, Tile::Floor);
        let mut extractor = EdgeTileExtractor::new(&grid);
        let edges = extractor.extract(&grid, &regions[0]);
        // 5x3 room: everything but the middle row's three inner tiles.
        assert_eq!(edges.len(), 12);
        assert!(!edges.contains(&Coord::new(3, 2)));
        assert!(edges.iter().all(|&c| is_edge_tile(&grid, c)));
    }

    #[test]
    fn test_walk_is_mostly_continuous() {
        let grid = room_grid();
        let regions = find_regions(&grid, Tile::Floor);
        let edges = EdgeTileExtractor::new(&grid).extract(&grid, &regions[0]);
        let jumps = edges
            .windows(2)
            .filter(|pair| pair[0].distance_squared(pair[1]) > 2)
            .count();
        assert_eq!(jumps, 0, "rim of a convex room walks without jumps: {edges:?}");
    }

    #[test]
    fn test_extractor_reusable_across_regions() {
        let grid = TileGrid::from_ascii(&[
            "#########",
            "#...#...#",
            "#...#...#",
            "#########",
        ])
        .unwrap();
        let regions = find_regions(&grid, Tile::Floor);
        assert_eq!(regions.len(), 2);
        let mut extractor = EdgeTileExtractor::new(&grid);
        let first = extractor.extract(&grid, &regions[0]);
        let again = extractor.extract(&grid, &regions[0]);
        let second = extractor.extract(&grid, &regions[1]);
        assert_eq!(first, again);
        assert_eq!(first.len(), 6);
        assert_eq!(second.len(), 6);
        assert!(second.iter().all(|c| c.x > 4));
    }

    #[test]
    fn test_diagonal_step_requires_shared_floor() {
        let grid = TileGrid::from_ascii(&["#.", ".#"]).unwrap();
        assert!(!is_valid_diagonal_step(&grid, Coord::new(0, 0), Coord::new(1, 1)));
        let open = TileGrid::from_ascii(&["..", ".#"]).unwrap();
        assert!(is_valid_diagonal_step(&open, Coord::new(0, 0), Coord::new(1, 1)));
    }

    #[test]
    fn test_every_edge_tile_visited_with_holes() {
        let grid = TileGrid::from_ascii(&[
            "#######",
            "#.....#",
            "#.#.#.#",
            "#.....#",
            "#######",
        ])
        .unwrap();
        let regions = find_regions(&grid, Tile::Floor);
        assert_eq!(regions.len(), 1);
        let edges = EdgeTileExtractor::new(&grid).extract(&grid, &regions[0]);
        let expected = regions[0].iter().filter(|&c| is_edge_tile(&grid, c)).count();
        assert_eq!(edges.len(), expected);
        let mut sorted = edges.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), edges.len(), "no tile visited twice");
    }

    #[test]
    #[should_panic(expected = "empty region")]
    fn test_empty_region_panics() {
        let grid = room_grid();
        let region = Region::from_tiles(0, Tile::Floor, Vec::new());
        EdgeTileExtractor::new(&grid).extract(&grid, &region);
    }
}
