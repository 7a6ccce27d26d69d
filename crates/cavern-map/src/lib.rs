//! Cave map generation: cellular-automaton fill and smoothing, region
//! analysis, and tunnelling until every floor region is reachable.
//!
//! [`generate_cave`] runs the whole pipeline from a [`CaveParams`]; the
//! individual stages are public for callers that need finer control.

mod error;
mod grid;
mod tile;

pub mod cellular;
pub mod connectivity;
pub mod pipeline;
pub mod region;
pub mod seed;
pub mod tunnel;

pub use cellular::{SmoothingRule, initialize, prune_small_regions, smooth};
pub use connectivity::{Connection, plan_connections};
pub use error::MapError;
pub use grid::TileGrid;
pub use pipeline::{CaveLayout, CaveParams, connect_regions, generate_cave};
pub use region::{Region, find_regions};
pub use seed::{SeedStream, derive_seed, stream_rng};
pub use tile::{Coord, Tile};
pub use tunnel::{
    DirectTunnel, RandomWalkTunnel, TunnelPath, TunnelStyle, WALK_STEPS_PER_TILE, carve_tunnels,
};
