//! Approximate closest-pair search between two ordered edge-tile lists.

use crate::tile::Coord;

/// Finds a near-closest pair between `from` and `to` with a galloping scan.
///
/// For each tile of `from` the scan over `to` jumps ahead by the distance it
/// just measured (at least one tile). Edge lists follow the rim of their
/// region, so tiles within `d` positions of a candidate at distance `d` are
/// rarely much closer, and true nearest pairs are short. The result may
/// miss the exact optimum by a small margin; in exchange the scan is close
/// to linear rather than `|from| × |to|`.
///
/// Returns `(from_tile, to_tile, distance)`.
///
/// # Panics
///
/// Panics if either list is empty.
pub fn nearest_pair(from: &[Coord], to: &[Coord]) -> (Coord, Coord, f64) {
    assert!(!from.is_empty() && !to.is_empty(), "nearest pair of an empty edge list");

    let mut best = (from[0], to[0]);
    let mut best_squared = i64::MAX;
    for &a in from {
        let mut j = 0;
        while j < to.len() {
            let b = to[j];
            let squared = a.distance_squared(b);
            if squared < best_squared {
                best_squared = squared;
                best = (a, b);
            }
            let skip = (squared as f64).sqrt() as usize;
            j += skip.max(1);
        }
    }
    (best.0, best.1, (best_squared as f64).sqrt())
}

/// Exhaustive closest-pair search; the reference the galloping scan is
/// measured against.
pub fn exact_nearest_pair(from: &[Coord], to: &[Coord]) -> (Coord, Coord, f64) {
    assert!(!from.is_empty() && !to.is_empty(), "nearest pair of an empty edge list");

    let mut best = (from[0], to[0]);
    let mut best_squared = i64::MAX;
    for &a in from {
        for &b in to {
            let squared = a.distance_squared(b);
            if squared < best_squared {
                best_squared = squared;
                best = (a, b);
            }
        }
    }
    (best.0, best.1, (best_squared as f64).sqrt())
}
