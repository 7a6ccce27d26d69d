//! End-to-end cave generation from a single parameter set.

use serde::{Deserialize, Serialize};

use crate::cellular::{
    DEFAULT_SMOOTHING_ITERATIONS, DEFAULT_WALL_THRESHOLD, SmoothingRule, initialize,
    prune_small_regions, smooth,
};
use crate::connectivity::{Connection, plan_connections};
use crate::error::MapError;
use crate::grid::TileGrid;
use crate::region::find_regions;
use crate::tile::Tile;
use crate::tunnel::{TunnelStyle, carve_tunnels, validate_radius};

/// Parameters of one cave generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveParams {
    /// Tiles along x.
    pub length: usize,
    /// Tiles along y.
    pub width: usize,
    /// Probability that a tile starts as wall.
    pub density: f64,
    pub seed: u64,
    pub smoothing_iterations: usize,
    /// Walls out of nine in a 3x3 block above which a tile becomes wall.
    pub wall_threshold: u8,
    /// Wall regions smaller than this are opened up.
    pub min_wall_region: usize,
    /// Floor regions smaller than this are filled in.
    pub min_floor_region: usize,
    pub tunnel_radius: f32,
    pub tunnel: TunnelStyle,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            length: 64,
            width: 64,
            density: 0.45,
            seed: 0,
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
            wall_threshold: DEFAULT_WALL_THRESHOLD,
            min_wall_region: 10,
            min_floor_region: 10,
            tunnel_radius: 1.0,
            tunnel: TunnelStyle::Direct,
        }
    }
}

impl CaveParams {
    /// Rejects any parameter generation could not honour.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.length == 0 || self.width == 0 {
            return Err(MapError::InvalidDimensions {
                length: self.length,
                width: self.width,
            });
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(MapError::InvalidDensity(self.density));
        }
        SmoothingRule::new(self.wall_threshold)?;
        validate_radius(self.tunnel_radius)?;
        self.tunnel.validate()
    }
}

/// A finished cave: the tile grid and the tunnels carved into it.
#[derive(Clone, Debug)]
pub struct CaveLayout {
    pub grid: TileGrid,
    pub connections: Vec<Connection>,
}

/// Runs the full generation pipeline.
///
/// Fill, smooth, seal the border, drop small wall regions, reseal, drop
/// small floor regions, then tunnel between whatever floor regions remain.
/// If any floor survives, the result has exactly one floor region.
///
/// # Errors
///
/// Any invalid parameter (see [`CaveParams::validate`]) before work starts,
/// and [`MapError::TunnelWalkExhausted`] if a randomized tunnel gives up.
pub fn generate_cave(params: &CaveParams) -> Result<CaveLayout, MapError> {
    params.validate()?;
    let rule = SmoothingRule::new(params.wall_threshold)?;

    let mut grid = initialize(params.length, params.width, params.density, params.seed)?;
    smooth(&mut grid, params.smoothing_iterations, rule);
    grid.seal_border();

    prune_small_regions(&mut grid, Tile::Wall, params.min_wall_region);
    grid.seal_border();
    prune_small_regions(&mut grid, Tile::Floor, params.min_floor_region);

    let connections = connect_regions(&mut grid, params)?;

    tracing::info!(
        "generated {}x{} cave (seed {}): {} floor tiles joined by {} tunnels",
        params.length,
        params.width,
        params.seed,
        grid.count(Tile::Floor),
        connections.len()
    );
    Ok(CaveLayout { grid, connections })
}

/// Joins every floor region of `grid` with tunnels in the style `params`
/// selects, returning the planned connections.
///
/// A tunnel that fails aborts the stage with its error; tunnels carved
/// before it stay carved.
pub fn connect_regions(grid: &mut TileGrid, params: &CaveParams) -> Result<Vec<Connection>, MapError> {
    let mut strategy = params.tunnel.build(params.seed)?;
    let regions = find_regions(grid, Tile::Floor);
    let connections = plan_connections(grid, &regions);
    let carved = carve_tunnels(grid, &connections, params.tunnel_radius, strategy.as_mut())?;
    tracing::debug!(
        "{} regions joined by {} tunnels ({} tiles carved)",
        regions.len(),
        connections.len(),
        carved
    );
    Ok(connections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tunnel::WALK_STEPS_PER_TILE;

    fn scenario() -> CaveParams {
        CaveParams {
            length: 20,
            width: 20,
            density: 0.45,
            seed: 42,
            smoothing_iterations: 5,
            min_wall_region: 10,
            min_floor_region: 10,
            tunnel_radius: 1.0,
            ..CaveParams::default()
        }
    }

    fn assert_single_floor_region(grid: &TileGrid) {
        if grid.count(Tile::Floor) > 0 {
            assert_eq!(find_regions(grid, Tile::Floor).len(), 1, "\n{grid}");
        }
    }

    #[test]
    fn test_small_scenario_is_connected() {
        let cave = generate_cave(&scenario()).unwrap();
        assert!(cave.grid.count(Tile::Floor) > 0);
        assert_eq!(find_regions(&cave.grid, Tile::Floor).len(), 1);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_cave(&scenario()).unwrap();
        let b = generate_cave(&scenario()).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.connections, b.connections);
    }

    #[test]
    fn test_border_stays_sealed() {
        let cave = generate_cave(&CaveParams {
            tunnel_radius: 3.0,
            ..scenario()
        })
        .unwrap();
        for (c, tile) in cave.grid.iter() {
            if cave.grid.is_boundary(c.x, c.y) {
                assert_eq!(tile, Tile::Wall);
            }
        }
    }

    #[test]
    fn test_connected_across_seeds_and_styles() {
        for seed in 0..8 {
            for tunnel in [TunnelStyle::Direct, TunnelStyle::RandomWalk { variance: 0.3 }] {
                let params = CaveParams {
                    length: 48,
                    width: 32,
                    seed,
                    tunnel,
                    ..CaveParams::default()
                };
                let cave = generate_cave(&params).unwrap();
                assert_single_floor_region(&cave.grid);
            }
        }
    }

    #[test]
    fn test_rejects_invalid_params() {
        let bad_density = CaveParams {
            density: 1.5,
            ..CaveParams::default()
        };
        assert_eq!(generate_cave(&bad_density).unwrap_err(), MapError::InvalidDensity(1.5));

        let bad_size = CaveParams {
            width: 0,
            ..CaveParams::default()
        };
        assert!(matches!(
            bad_size.validate(),
            Err(MapError::InvalidDimensions { width: 0, .. })
        ));

        let bad_radius = CaveParams {
            tunnel_radius: f32::NAN,
            ..CaveParams::default()
        };
        assert!(matches!(bad_radius.validate(), Err(MapError::InvalidRadius(_))));

        let bad_style = CaveParams {
            tunnel: TunnelStyle::RandomWalk { variance: 1.0 },
            ..CaveParams::default()
        };
        assert_eq!(bad_style.validate(), Err(MapError::InvalidVariance(1.0)));
    }

    #[test]
    fn test_exhausted_walk_aborts_connection() {
        // Two single-tile rooms at opposite ends of a one-tile corridor band.
        let mut grid = TileGrid::new(2003, 3, Tile::Wall).unwrap();
        grid.set(1, 1, Tile::Floor);
        grid.set(2001, 1, Tile::Floor);
        let params = CaveParams {
            length: 2003,
            width: 3,
            tunnel_radius: 0.0,
            tunnel: TunnelStyle::RandomWalk { variance: 0.999 },
            ..CaveParams::default()
        };

        match connect_regions(&mut grid, &params) {
            Err(MapError::TunnelWalkExhausted { steps, .. }) => {
                assert_eq!(steps, WALK_STEPS_PER_TILE * 2001);
            }
            other => panic!("expected an exhausted walk, got {other:?}"),
        }
        assert_eq!(grid.count(Tile::Floor), 2, "failed tunnel carved nothing");
    }

    #[test]
    fn test_connect_regions_joins_rooms() {
        let mut grid = TileGrid::from_ascii(&["#########", "#..###..#", "#########"]).unwrap();
        let params = CaveParams {
            tunnel_radius: 0.0,
            ..CaveParams::default()
        };
        let connections = connect_regions(&mut grid, &params).unwrap();
        assert_eq!(connections.len(), 1);
        assert_single_floor_region(&grid);
    }

    #[test]
    fn test_params_ron_round_trip() {
        let params = CaveParams {
            tunnel: TunnelStyle::RandomWalk { variance: 0.2 },
            ..scenario()
        };
        let text = ron::to_string(&params).unwrap();
        let back: CaveParams = ron::from_str(&text).unwrap();
        assert_eq!(back, params);
    }
}
