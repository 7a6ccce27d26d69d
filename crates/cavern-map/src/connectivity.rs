//! Region connectivity: picks a near-minimal set of tunnels that links every
//! floor region.
//!
//! The plan is built in four steps:
//! 1. order each region's edge tiles by a walk along its rim,
//! 2. find an approximate closest tile pair for every pair of regions,
//! 3. bucket sort those candidate connections by distance,
//! 4. keep the minimum spanning tree of the candidates (Kruskal).

mod edge_tiles;
mod nearest;
mod spanning_tree;

use std::cmp::Ordering;

pub use edge_tiles::{EdgeTileExtractor, is_edge_tile, is_valid_diagonal_step};
pub use nearest::{exact_nearest_pair, nearest_pair};
pub use spanning_tree::{DisjointSet, minimum_spanning_tree, sort_by_distance};

use crate::grid::TileGrid;
use crate::region::Region;
use crate::tile::Coord;

/// A candidate tunnel between two regions, weighted by tile distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    from: Coord,
    to: Coord,
    from_region: usize,
    to_region: usize,
    distance: f64,
}

impl Connection {
    pub fn new(from: Coord, to: Coord, from_region: usize, to_region: usize, distance: f64) -> Self {
        debug_assert!(distance.is_finite() && distance >= 0.0);
        Self {
            from,
            to,
            from_region,
            to_region,
            distance,
        }
    }

    /// Tile in the first region.
    #[inline]
    pub fn from(&self) -> Coord {
        self.from
    }

    /// Tile in the second region.
    #[inline]
    pub fn to(&self) -> Coord {
        self.to
    }

    /// Indices of the two regions joined.
    #[inline]
    pub fn regions(&self) -> (usize, usize) {
        (self.from_region, self.to_region)
    }

    /// Euclidean distance between the two tiles.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Total order by distance.
    pub fn cmp_distance(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

/// Computes the connections whose tunnels make every region mutually
/// reachable.
///
/// `regions` must be the output of [`crate::find_regions`] for `grid` (region
/// indices equal to positions). With fewer than two regions there is nothing
/// to connect and the result is empty. Otherwise the result holds exactly
/// `regions.len() - 1` connections.
pub fn plan_connections(grid: &TileGrid, regions: &[Region]) -> Vec<Connection> {
    if regions.len() < 2 {
        return Vec::new();
    }

    let mut extractor = EdgeTileExtractor::new(grid);
    let edges: Vec<Vec<Coord>> = regions
        .iter()
        .enumerate()
        .map(|(position, region)| {
            assert_eq!(region.index(), position, "region indices must match positions");
            extractor.extract(grid, region)
        })
        .collect();

    let count = regions.len();
    let mut candidates = Vec::with_capacity(count * (count - 1) / 2);
    for a in 0..count {
        for b in a + 1..count {
            let (from, to, distance) = nearest_pair(&edges[a], &edges[b]);
            candidates.push(Connection::new(from, to, a, b, distance));
        }
    }

    let tree = minimum_spanning_tree(count, sort_by_distance(candidates));
    tracing::debug!(
        "planned {} connections for {} regions ({} edge tiles)",
        tree.len(),
        count,
        edges.iter().map(Vec::len).sum::<usize>()
    );
    tree
}
