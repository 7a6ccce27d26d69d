//! Flood-fill region analysis.
//!
//! A region is a maximal set of same-type tiles connected through
//! orthogonal steps. Regions are discovered in row-major scan order, which
//! fixes their indices for a given grid.

use std::collections::VecDeque;

use crate::grid::TileGrid;
use crate::tile::{Coord, Tile};

/// A connected set of same-type tiles.
///
/// Tiles are stored in BFS discovery order. A region is immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    index: usize,
    tile: Tile,
    tiles: Vec<Coord>,
}

impl Region {
    pub(crate) fn from_tiles(index: usize, tile: Tile, tiles: Vec<Coord>) -> Self {
        Self { index, tile, tiles }
    }

    /// Position of this region among its siblings; used as a graph vertex id.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The tile type every member shares.
    #[inline]
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Member coordinates in discovery order.
    #[inline]
    pub fn tiles(&self) -> &[Coord] {
        &self.tiles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.tiles.iter().copied()
    }
}

/// Finds every region of `tile` in `grid`.
///
/// Tiles of the other type are marked visited before the scan starts, so each
/// unvisited tile met in row-major order seeds exactly one new region.
pub fn find_regions(grid: &TileGrid, tile: Tile) -> Vec<Region> {
    let mut visited: Vec<bool> = grid.as_slice().iter().map(|&t| t != tile).collect();
    let mut regions = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..grid.area() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(grid.coord_of(start));

        let mut tiles = Vec::new();
        while let Some(current) = queue.pop_front() {
            tiles.push(current);
            for delta in Coord::ORTHOGONAL {
                let next = current.offset(delta);
                if !grid.contains_coord(next) {
                    continue;
                }
                let index = grid.linear_index(next.x, next.y);
                if !visited[index] {
                    visited[index] = true;
                    queue.push_back(next);
                }
            }
        }

        regions.push(Region::from_tiles(regions.len(), tile, tiles));
    }

    tracing::trace!("found {} {:?} regions", regions.len(), tile);
    regions
}
