//! Cellular-automaton cave generation: random fill, smoothing, and pruning
//! of undersized regions.

use rand::Rng;

use crate::error::MapError;
use crate::grid::TileGrid;
use crate::region::find_regions;
use crate::seed::{SeedStream, stream_rng};
use crate::tile::Tile;

/// Upper bound on smoothing passes. The automaton settles within a handful
/// of passes, so anything past this only burns time.
pub const MAX_SMOOTHING_ITERATIONS: usize = 10;

/// Default number of smoothing passes.
pub const DEFAULT_SMOOTHING_ITERATIONS: usize = 5;

/// Default wall threshold: a tile becomes wall when more than this many of
/// the nine cells in its 3x3 block are walls.
pub const DEFAULT_WALL_THRESHOLD: u8 = 4;

/// Fills a new grid with walls at probability `density`.
///
/// The fill draws from the [`SeedStream::Fill`] stream of `seed`, so equal
/// arguments always produce equal grids.
///
/// # Errors
///
/// [`MapError::InvalidDimensions`] for a zero dimension and
/// [`MapError::InvalidDensity`] for a density outside `[0, 1]` (NaN included).
pub fn initialize(length: usize, width: usize, density: f64, seed: u64) -> Result<TileGrid, MapError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(MapError::InvalidDensity(density));
    }
    let mut grid = TileGrid::new(length, width, Tile::Floor)?;
    let mut rng = stream_rng(seed, SeedStream::Fill);
    grid.transform(|_, _| {
        if rng.random_bool(density) {
            Tile::Wall
        } else {
            Tile::Floor
        }
    });
    tracing::debug!(
        "initialized {}x{} grid, {} walls (density {density})",
        length,
        width,
        grid.count(Tile::Wall)
    );
    Ok(grid)
}

/// Rule applied by one smoothing pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SmoothingRule {
    threshold: u8,
}

impl SmoothingRule {
    /// Creates a rule; `threshold` counts walls out of the nine cells of an
    /// interior 3x3 block.
    ///
    /// # Errors
    ///
    /// [`MapError::InvalidThreshold`] if `threshold > 8`: no block could ever
    /// exceed it.
    pub fn new(threshold: u8) -> Result<Self, MapError> {
        if threshold > 8 {
            return Err(MapError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Decides the next state of a tile from the wall count of its block.
    ///
    /// Interior blocks hold nine cells. Blocks clipped by the grid edge hold
    /// fewer, and the threshold is scaled to the cells present:
    /// `walls / cells > threshold / 9`.
    #[inline]
    pub fn next_tile(&self, walls: u8, cells: u8) -> Tile {
        if walls as u32 * 9 > self.threshold as u32 * cells as u32 {
            Tile::Wall
        } else {
            Tile::Floor
        }
    }
}

impl Default for SmoothingRule {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_WALL_THRESHOLD,
        }
    }
}

/// Runs up to `iterations` smoothing passes over `grid`.
///
/// Each pass reads one buffer and writes the other, then the two are swapped,
/// so no pass ever sees a half-updated grid. Requests above
/// [`MAX_SMOOTHING_ITERATIONS`] are clamped. Smoothing stops early once a
/// pass leaves the grid unchanged. Returns the number of passes that changed
/// at least one tile.
pub fn smooth(grid: &mut TileGrid, iterations: usize, rule: SmoothingRule) -> usize {
    let iterations = if iterations > MAX_SMOOTHING_ITERATIONS {
        tracing::warn!(
            "smoothing iterations {iterations} clamped to {MAX_SMOOTHING_ITERATIONS}"
        );
        MAX_SMOOTHING_ITERATIONS
    } else {
        iterations
    };
    if iterations == 0 {
        return 0;
    }

    let mut back = grid.clone();
    let mut changed_passes = 0;
    for _ in 0..iterations {
        let front: &TileGrid = &*grid;
        let mut changed = false;
        back.transform(|c, _| {
            let (walls, cells) = front.wall_count_3x3(c.x, c.y);
            let next = rule.next_tile(walls, cells);
            if next != front.get_unchecked(c.x, c.y) {
                changed = true;
            }
            next
        });
        std::mem::swap(grid, &mut back);
        if !changed {
            break;
        }
        changed_passes += 1;
    }
    tracing::debug!(
        "smoothing with threshold {} converged after {changed_passes} changing passes",
        rule.threshold()
    );
    changed_passes
}

/// Flips every region of `tile` smaller than `threshold` tiles to the
/// opposite type. Returns how many regions were removed.
pub fn prune_small_regions(grid: &mut TileGrid, tile: Tile, threshold: usize) -> usize {
    let mut removed = 0;
    for region in find_regions(grid, tile) {
        if region.len() < threshold {
            grid.fill_coords(region.tiles(), tile.opposite());
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::debug!("pruned {removed} {tile:?} regions below {threshold} tiles");
    }
    removed
}
