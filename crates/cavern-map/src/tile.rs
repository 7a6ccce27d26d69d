//! Tile values and integer grid coordinates.

use serde::{Deserialize, Serialize};

/// A single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Open, walkable space.
    Floor,
    /// Solid rock.
    #[default]
    Wall,
}

impl Tile {
    /// Returns the other tile type.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Tile::Floor => Tile::Wall,
            Tile::Wall => Tile::Floor,
        }
    }

    /// Character used by the ASCII dump of a grid.
    pub fn glyph(self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Wall => '#',
        }
    }
}

/// Integer tile coordinate. `x` grows to the right, `y` grows upward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// The four orthogonal unit offsets, in the order left, right, down, up.
    pub const ORTHOGONAL: [Coord; 4] = [
        Coord::new(-1, 0),
        Coord::new(1, 0),
        Coord::new(0, -1),
        Coord::new(0, 1),
    ];

    /// The four diagonal unit offsets.
    pub const DIAGONAL: [Coord; 4] = [
        Coord::new(-1, -1),
        Coord::new(1, -1),
        Coord::new(-1, 1),
        Coord::new(1, 1),
    ];

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset.
    #[inline]
    pub fn offset(self, delta: Coord) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }

    /// Squared Euclidean distance, exact in integer arithmetic.
    #[inline]
    pub fn distance_squared(self, other: Coord) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Euclidean distance in tiles.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Manhattan (4-step) distance in tiles.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_flips() {
        assert_eq!(Tile::Wall.opposite(), Tile::Floor);
        assert_eq!(Tile::Floor.opposite(), Tile::Wall);
    }

    #[test]
    fn test_distance_metrics() {
        let a = Coord::new(1, 1);
        let b = Coord::new(4, 5);
        assert_eq!(a.distance_squared(b), 25);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert_eq!(a.manhattan(b), 7);
    }

    #[test]
    fn test_offsets_are_unit_steps() {
        let origin = Coord::new(0, 0);
        for delta in Coord::ORTHOGONAL {
            assert_eq!(origin.manhattan(origin.offset(delta)), 1);
        }
        for delta in Coord::DIAGONAL {
            assert_eq!(origin.distance_squared(origin.offset(delta)), 2);
        }
    }
}
