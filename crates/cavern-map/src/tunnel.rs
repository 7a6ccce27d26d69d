//! Tunnel carving between connected regions.
//!
//! A [`TunnelPath`] strategy turns a connection into a sequence of tiles;
//! [`carve_tunnels`] then clears a disc around every tile of every path.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::connectivity::Connection;
use crate::error::MapError;
use crate::grid::TileGrid;
use crate::seed::{SeedStream, stream_rng};
use crate::tile::{Coord, Tile};

/// Step budget of a random walk, per tile of Manhattan distance to cover.
pub const WALK_STEPS_PER_TILE: usize = 100;

/// Produces the tiles a tunnel passes through.
pub trait TunnelPath {
    /// Tiles from `start` to `end`, both included. Consecutive tiles are
    /// orthogonal neighbours, and every tile lies in the axis-aligned box
    /// spanned by the two endpoints.
    ///
    /// # Errors
    ///
    /// [`MapError::TunnelWalkExhausted`] if the strategy gives up.
    fn path(&mut self, start: Coord, end: Coord) -> Result<Vec<Coord>, MapError>;
}

/// Straight rasterised line.
///
/// The line only takes orthogonal steps, so it stays 4-connected even with a
/// zero carve radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectTunnel;

impl TunnelPath for DirectTunnel {
    fn path(&mut self, start: Coord, end: Coord) -> Result<Vec<Coord>, MapError> {
        let dx = (end.x - start.x).unsigned_abs() as i64;
        let dy = (end.y - start.y).unsigned_abs() as i64;
        let step_x = (end.x - start.x).signum();
        let step_y = (end.y - start.y).signum();

        let mut path = Vec::with_capacity((dx + dy + 1) as usize);
        let mut current = start;
        path.push(current);
        let (mut ix, mut iy) = (0i64, 0i64);
        while ix < dx || iy < dy {
            // Compare how far along each axis the next half-step would be.
            if (1 + 2 * ix) * dy < (1 + 2 * iy) * dx {
                current.x += step_x;
                ix += 1;
            } else {
                current.y += step_y;
                iy += 1;
            }
            path.push(current);
        }
        Ok(path)
    }
}

/// Random walk biased toward the goal.
///
/// Each step deviates in a uniformly random direction with probability
/// `variance`; otherwise it moves toward the goal along an axis chosen in
/// proportion to the distance left on that axis. Steps leaving the box
/// spanned by the endpoints are discarded. The walk gives up after
/// [`WALK_STEPS_PER_TILE`] attempted steps per tile of Manhattan distance.
#[derive(Clone, Debug)]
pub struct RandomWalkTunnel<R: Rng = ChaCha8Rng> {
    rng: R,
    variance: f64,
}

impl<R: Rng> RandomWalkTunnel<R> {
    /// # Errors
    ///
    /// [`MapError::InvalidVariance`] unless `0 <= variance < 1`.
    pub fn new(rng: R, variance: f64) -> Result<Self, MapError> {
        if !(0.0..1.0).contains(&variance) {
            return Err(MapError::InvalidVariance(variance));
        }
        Ok(Self { rng, variance })
    }
}

impl<R: Rng> TunnelPath for RandomWalkTunnel<R> {
    fn path(&mut self, start: Coord, end: Coord) -> Result<Vec<Coord>, MapError> {
        let (min_x, max_x) = (start.x.min(end.x), start.x.max(end.x));
        let (min_y, max_y) = (start.y.min(end.y), start.y.max(end.y));
        let budget = WALK_STEPS_PER_TILE * (start.manhattan(end) as usize + 1);

        let mut path = vec![start];
        let mut current = start;
        let mut steps = 0;
        while current != end {
            if steps == budget {
                return Err(MapError::TunnelWalkExhausted { start, end, steps });
            }
            steps += 1;

            let next = if self.rng.random_bool(self.variance) {
                current.offset(Coord::ORTHOGONAL[self.rng.random_range(0..4)])
            } else {
                let remaining_x = current.x.abs_diff(end.x);
                let remaining_y = current.y.abs_diff(end.y);
                if self.rng.random_range(0..remaining_x + remaining_y) < remaining_x {
                    Coord::new(current.x + (end.x - current.x).signum(), current.y)
                } else {
                    Coord::new(current.x, current.y + (end.y - current.y).signum())
                }
            };

            if next.x < min_x || next.x > max_x || next.y < min_y || next.y > max_y {
                continue;
            }
            current = next;
            path.push(current);
        }
        Ok(path)
    }
}

/// Selects the built-in tunnel strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum TunnelStyle {
    /// [`DirectTunnel`].
    #[default]
    Direct,
    /// [`RandomWalkTunnel`] with the given deviation probability.
    RandomWalk { variance: f64 },
}

impl TunnelStyle {
    /// Checks the style's parameters without building it.
    pub fn validate(&self) -> Result<(), MapError> {
        match *self {
            TunnelStyle::Direct => Ok(()),
            TunnelStyle::RandomWalk { variance } if (0.0..1.0).contains(&variance) => Ok(()),
            TunnelStyle::RandomWalk { variance } => Err(MapError::InvalidVariance(variance)),
        }
    }

    /// Builds the strategy. Random walks draw from the
    /// [`SeedStream::Tunnel`] stream of `seed`.
    pub fn build(&self, seed: u64) -> Result<Box<dyn TunnelPath>, MapError> {
        match *self {
            TunnelStyle::Direct => Ok(Box::new(DirectTunnel)),
            TunnelStyle::RandomWalk { variance } => Ok(Box::new(RandomWalkTunnel::new(
                stream_rng(seed, SeedStream::Tunnel),
                variance,
            )?)),
        }
    }
}

/// Checks a carve radius.
pub fn validate_radius(radius: f32) -> Result<(), MapError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(MapError::InvalidRadius(radius))
    }
}

/// Carves a tunnel along every connection.
///
/// Every path tile becomes floor, along with every tile within `radius`
/// (Euclidean) of it. Boundary tiles are only cleared when they are on the
/// path itself, so a sealed border stays sealed. Returns how many tiles
/// changed from wall to floor.
///
/// # Errors
///
/// [`MapError::InvalidRadius`] for a negative or non-finite radius, and any
/// error raised by `strategy`. A failed path aborts the whole carve.
pub fn carve_tunnels(
    grid: &mut TileGrid,
    connections: &[Connection],
    radius: f32,
    strategy: &mut dyn TunnelPath,
) -> Result<usize, MapError> {
    validate_radius(radius)?;
    // No halo needs to reach further than the grid's own extent.
    let extent = (grid.length() + grid.width()) as f32;
    let reach = radius.min(extent).floor() as i32;
    let radius_squared = f64::from(radius) * f64::from(radius);

    let mut carved = 0;
    for connection in connections {
        let path = strategy.path(connection.from(), connection.to())?;
        for &center in &path {
            if grid.get_coord(center) == Some(Tile::Wall) {
                grid.set_coord(center, Tile::Floor);
                carved += 1;
            }
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    if (i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy)) as f64
                        > radius_squared
                    {
                        continue;
                    }
                    let (x, y) = (center.x + dx, center.y + dy);
                    if grid.is(x, y, Tile::Wall) && !grid.is_boundary(x, y) {
                        grid.set(x, y, Tile::Floor);
                        carved += 1;
                    }
                }
            }
        }
    }
    tracing::debug!("carved {carved} tiles along {} tunnels", connections.len());
    Ok(carved)
}
