//! Command-line argument parsing.

use std::path::PathBuf;

use cavern_map::TunnelStyle;
use clap::{Parser, ValueEnum};

use crate::Config;

/// Variance used for `--tunnel walk` when neither the flag nor the config
/// file gives one.
const DEFAULT_WALK_VARIANCE: f64 = 0.3;

/// Tunnel strategy selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TunnelArg {
    /// Straight rasterised line.
    Direct,
    /// Goal-biased random walk.
    Walk,
}

/// Cave generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "cavern", about = "Procedural cave generator")]
pub struct CliArgs {
    /// Master seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Map length in tiles (x axis).
    #[arg(long)]
    pub length: Option<usize>,

    /// Map width in tiles (y axis).
    #[arg(long)]
    pub width: Option<usize>,

    /// Initial wall probability in [0, 1].
    #[arg(long)]
    pub density: Option<f64>,

    /// Smoothing passes.
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Tunnel radius in tiles.
    #[arg(long)]
    pub tunnel_radius: Option<f32>,

    /// Tunnel strategy.
    #[arg(long, value_enum)]
    pub tunnel: Option<TunnelArg>,

    /// Deviation probability of the random-walk tunnel, in [0, 1).
    #[arg(long)]
    pub walk_variance: Option<f64>,

    /// Height of the extruded walls.
    #[arg(long)]
    pub wall_height: Option<f32>,

    /// Print the finished map as ASCII.
    #[arg(long)]
    pub print_map: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let generation = &mut self.generation;
        if let Some(seed) = args.seed {
            generation.seed = seed;
        }
        if let Some(length) = args.length {
            generation.length = length;
        }
        if let Some(width) = args.width {
            generation.width = width;
        }
        if let Some(density) = args.density {
            generation.density = density;
        }
        if let Some(iterations) = args.iterations {
            generation.smoothing_iterations = iterations;
        }
        if let Some(radius) = args.tunnel_radius {
            generation.tunnel_radius = radius;
        }

        let configured_variance = match generation.tunnel {
            TunnelStyle::RandomWalk { variance } => Some(variance),
            TunnelStyle::Direct => None,
        };
        match args.tunnel {
            Some(TunnelArg::Direct) => generation.tunnel = TunnelStyle::Direct,
            Some(TunnelArg::Walk) => {
                generation.tunnel = TunnelStyle::RandomWalk {
                    variance: args
                        .walk_variance
                        .or(configured_variance)
                        .unwrap_or(DEFAULT_WALK_VARIANCE),
                }
            }
            None => {
                if let (Some(variance), TunnelStyle::RandomWalk { .. }) =
                    (args.walk_variance, generation.tunnel)
                {
                    generation.tunnel = TunnelStyle::RandomWalk { variance };
                }
            }
        }

        if let Some(height) = args.wall_height {
            self.mesh.wall_height = height;
        }
        if let Some(print) = args.print_map {
            self.debug.print_map = print;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
