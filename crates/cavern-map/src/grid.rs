//! Rectangular tile grid with bounds-checked access and bulk transforms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::tile::{Coord, Tile};

/// A `length × width` grid of [`Tile`]s.
///
/// `x` runs along the length (left to right) and `y` along the width (bottom
/// to top). Tiles are stored row by row, so `y` is the slow axis. The
/// dimensions never change after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    length: usize,
    width: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid filled with `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidDimensions`] if either dimension is zero, or
    /// if a coordinate would not fit in an `i32`.
    pub fn new(length: usize, width: usize, fill: Tile) -> Result<Self, MapError> {
        if length == 0 || width == 0 || length > i32::MAX as usize || width > i32::MAX as usize
        {
            return Err(MapError::InvalidDimensions { length, width });
        }
        Ok(Self {
            length,
            width,
            tiles: vec![fill; length * width],
        })
    }

    /// Builds a grid from rows of text, top row first. `#` is a wall, anything
    /// else is floor. All rows must have the same length.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidDimensions`] for empty or ragged input.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, MapError> {
        let width = rows.len();
        let length = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Self::new(length, width, Tile::Wall)?;
        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != length {
                return Err(MapError::InvalidDimensions { length, width });
            }
            let y = width - 1 - row_index;
            for (x, ch) in row.chars().enumerate() {
                let tile = if ch == '#' { Tile::Wall } else { Tile::Floor };
                grid.tiles[y * length + x] = tile;
            }
        }
        Ok(grid)
    }

    /// Number of tiles along `x`.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of tiles along `y`.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of tiles.
    #[inline]
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if `(x, y)` lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.length && (y as usize) < self.width
    }

    /// Returns `true` if `coord` lies inside the grid.
    #[inline]
    pub fn contains_coord(&self, coord: Coord) -> bool {
        self.contains(coord.x, coord.y)
    }

    /// Returns `true` if `(x, y)` is on the outermost ring of tiles.
    #[inline]
    pub fn is_boundary(&self, x: i32, y: i32) -> bool {
        self.contains(x, y)
            && (x == 0 || y == 0 || x as usize == self.length - 1 || y as usize == self.width - 1)
    }

    /// Row-major linear index of an in-bounds coordinate.
    #[inline]
    pub fn linear_index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.contains(x, y), "({x}, {y}) outside {}x{}", self.length, self.width);
        y as usize * self.length + x as usize
    }

    /// Inverse of [`TileGrid::linear_index`].
    #[inline]
    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::new((index % self.length) as i32, (index / self.length) as i32)
    }

    /// Returns the tile at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        if self.contains(x, y) {
            Some(self.tiles[self.linear_index(x, y)])
        } else {
            None
        }
    }

    /// Returns the tile at `coord`, or `None` when out of bounds.
    #[inline]
    pub fn get_coord(&self, coord: Coord) -> Option<Tile> {
        self.get(coord.x, coord.y)
    }

    /// Returns the tile at `(x, y)` without a bounds check.
    ///
    /// Callers must have established `contains(x, y)` beforehand; only a
    /// debug assertion guards the access.
    #[inline]
    pub fn get_unchecked(&self, x: i32, y: i32) -> Tile {
        self.tiles[self.linear_index(x, y)]
    }

    /// Returns `true` if `(x, y)` is in bounds and holds `tile`.
    #[inline]
    pub fn is(&self, x: i32, y: i32, tile: Tile) -> bool {
        self.get(x, y) == Some(tile)
    }

    /// Sets the tile at `(x, y)`. Returns `false` (and leaves the grid alone)
    /// when the coordinate is out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        if !self.contains(x, y) {
            tracing::warn!("TileGrid::set out of bounds: ({}, {})", x, y);
            return false;
        }
        let index = self.linear_index(x, y);
        self.tiles[index] = tile;
        true
    }

    /// Sets the tile at `coord`; see [`TileGrid::set`].
    #[inline]
    pub fn set_coord(&mut self, coord: Coord, tile: Tile) -> bool {
        self.set(coord.x, coord.y, tile)
    }

    /// Overwrites every tile.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Overwrites every listed coordinate. Coordinates must be in bounds.
    pub fn fill_coords(&mut self, coords: &[Coord], tile: Tile) {
        for &c in coords {
            let index = self.linear_index(c.x, c.y);
            self.tiles[index] = tile;
        }
    }

    /// Forces every boundary tile to [`Tile::Wall`].
    pub fn seal_border(&mut self) {
        let (length, width) = (self.length as i32, self.width as i32);
        for x in 0..length {
            self.tiles[x as usize] = Tile::Wall;
            let top = self.linear_index(x, width - 1);
            self.tiles[top] = Tile::Wall;
        }
        for y in 0..width {
            let left = self.linear_index(0, y);
            let right = self.linear_index(length - 1, y);
            self.tiles[left] = Tile::Wall;
            self.tiles[right] = Tile::Wall;
        }
    }

    /// Swaps walls and floors.
    pub fn invert(&mut self) {
        for tile in &mut self.tiles {
            *tile = tile.opposite();
        }
    }

    /// Replaces every tile with `f(coord, tile)`.
    pub fn transform(&mut self, mut f: impl FnMut(Coord, Tile) -> Tile) {
        let length = self.length;
        for (index, tile) in self.tiles.iter_mut().enumerate() {
            let coord = Coord::new((index % length) as i32, (index / length) as i32);
            *tile = f(coord, *tile);
        }
    }

    /// Number of tiles equal to `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Counts walls in the 3×3 block centred on `(x, y)`, the centre included.
    ///
    /// Returns `(walls, cells)` where `cells` is how many of the nine
    /// positions fall inside the grid.
    pub fn wall_count_3x3(&self, x: i32, y: i32) -> (u8, u8) {
        let interior = x > 0
            && y > 0
            && (x as usize) + 1 < self.length
            && (y as usize) + 1 < self.width;
        let mut walls = 0u8;
        let mut cells = 0u8;
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                let tile = if interior {
                    self.get_unchecked(nx, ny)
                } else {
                    match self.get(nx, ny) {
                        Some(t) => t,
                        None => continue,
                    }
                };
                cells += 1;
                if tile == Tile::Wall {
                    walls += 1;
                }
            }
        }
        (walls, cells)
    }

    /// Iterates over all tiles with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, &tile)| (self.coord_of(index), tile))
    }

    /// Raw row-major tile slice.
    pub fn as_slice(&self) -> &[Tile] {
        &self.tiles
    }
}

/// Prints the grid top row first, one glyph per tile.
impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.width).rev() {
            let row = &self.tiles[y * self.length..(y + 1) * self.length];
            for tile in row {
                write!(f, "{}", tile.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            TileGrid::new(0, 5, Tile::Wall),
            Err(MapError::InvalidDimensions { length: 0, width: 5 })
        );
        assert!(TileGrid::new(5, 0, Tile::Wall).is_err());
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let grid = TileGrid::new(4, 3, Tile::Floor).unwrap();
        assert_eq!(grid.get(3, 2), Some(Tile::Floor));
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert_eq!(grid.get(-1, 0), None);
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut grid = TileGrid::new(2, 2, Tile::Floor).unwrap();
        assert!(!grid.set(2, 0, Tile::Wall));
        assert_eq!(grid.count(Tile::Wall), 0);
        assert!(grid.set(1, 1, Tile::Wall));
        assert_eq!(grid.get(1, 1), Some(Tile::Wall));
    }

    #[test]
    fn test_from_ascii_is_top_row_first() {
        let grid = TileGrid::from_ascii(&["#..", "..."]).unwrap();
        assert_eq!(grid.length(), 3);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.get(0, 1), Some(Tile::Wall));
        assert_eq!(grid.get(0, 0), Some(Tile::Floor));
    }

    #[test]
    fn test_from_ascii_rejects_ragged_rows() {
        assert!(TileGrid::from_ascii(&["###", "##"]).is_err());
        assert!(TileGrid::from_ascii(&[]).is_err());
    }

    #[test]
    fn test_display_round_trips_ascii() {
        let rows = ["####", "#..#", "####"];
        let grid = TileGrid::from_ascii(&rows).unwrap();
        assert_eq!(grid.to_string(), "####\n#..#\n####\n");
    }

    #[test]
    fn test_seal_border() {
        let mut grid = TileGrid::new(5, 4, Tile::Floor).unwrap();
        grid.seal_border();
        for (c, tile) in grid.iter() {
            let expected = if grid.is_boundary(c.x, c.y) { Tile::Wall } else { Tile::Floor };
            assert_eq!(tile, expected, "tile at {c:?}");
        }
        assert_eq!(grid.count(Tile::Floor), 3 * 2);
    }

    #[test]
    fn test_invert_and_transform() {
        let mut grid = TileGrid::new(3, 3, Tile::Wall).unwrap();
        grid.invert();
        assert_eq!(grid.count(Tile::Floor), 9);
        grid.transform(|c, t| if c.x == 1 { Tile::Wall } else { t });
        assert_eq!(grid.count(Tile::Wall), 3);
    }

    #[test]
    fn test_wall_count_3x3_interior_and_corner() {
        let grid = TileGrid::from_ascii(&["###", "#.#", "###"]).unwrap();
        assert_eq!(grid.wall_count_3x3(1, 1), (8, 9));
        assert_eq!(grid.wall_count_3x3(0, 0), (3, 4));
        assert_eq!(grid.wall_count_3x3(1, 0), (5, 6));
    }

    #[test]
    fn test_linear_index_round_trip() {
        let grid = TileGrid::new(7, 5, Tile::Wall).unwrap();
        for index in 0..grid.area() {
            let c = grid.coord_of(index);
            assert_eq!(grid.linear_index(c.x, c.y), index);
        }
    }
}
