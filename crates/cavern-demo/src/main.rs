//! Demo binary that generates a cave, meshes it and reports what it built.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p cavern-demo -- --seed 42 --print-map true`.

use std::path::PathBuf;
use std::process::ExitCode;

use cavern_config::{CliArgs, Config, default_config_dir};
use cavern_map::{MapError, Tile, TileGrid, generate_cave};
use cavern_mesh::{MeshData, MeshSettings, Outline, build_walls, extract_outlines, triangulate};
use clap::Parser;
use glam::Vec3;

/// Everything produced for one cave.
struct GeneratedCave {
    grid: TileGrid,
    tunnels: usize,
    ceiling: MeshData,
    outlines: Vec<Outline>,
    walls: MeshData,
    /// Ceiling and walls in one buffer, ready for upload.
    combined: MeshData,
}

fn build_cave(config: &Config) -> Result<GeneratedCave, MapError> {
    let layout = generate_cave(&config.generation)?;

    let settings = MeshSettings {
        cell_size: config.mesh.cell_size,
        origin: Vec3::from_array(config.mesh.origin),
    };
    let mut ceiling = triangulate(&layout.grid, &settings);
    ceiling.project_uvs(config.mesh.uv_tiling);
    let outlines = extract_outlines(&ceiling);
    let walls = build_walls(&ceiling, &outlines, config.mesh.wall_height);
    let mut combined = ceiling.clone();
    combined.append(&walls);

    Ok(GeneratedCave {
        grid: layout.grid,
        tunnels: layout.connections.len(),
        ceiling,
        outlines,
        walls,
        combined,
    })
}

fn report(cave: &GeneratedCave) {
    let floor = cave.grid.count(Tile::Floor);
    tracing::info!(
        "map {}x{}: {} floor tiles ({:.1}% open), {} tunnels",
        cave.grid.length(),
        cave.grid.width(),
        floor,
        100.0 * floor as f64 / cave.grid.area() as f64,
        cave.tunnels
    );
    tracing::info!(
        "ceiling mesh: {} vertices, {} triangles",
        cave.ceiling.vertex_count(),
        cave.ceiling.triangle_count()
    );
    let longest = cave.outlines.iter().map(Outline::len).max().unwrap_or(0);
    tracing::info!(
        "{} outlines (longest {} vertices), walls: {} vertices, {} triangles",
        cave.outlines.len(),
        longest,
        cave.walls.vertex_count(),
        cave.walls.triangle_count()
    );
    tracing::info!(
        "combined mesh: {} vertices, {} triangles",
        cave.combined.vertex_count(),
        cave.combined.triangle_count()
    );
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("cavern"));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    cavern_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    let cave = match build_cave(&config) {
        Ok(cave) => cave,
        Err(e) => {
            tracing::error!("cave generation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.debug.print_map {
        println!("{}", cave.grid);
    }
    report(&cave);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavern_map::find_regions;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.generation.length = 24;
        config.generation.width = 18;
        config.generation.seed = 5;
        config
    }

    #[test]
    fn test_build_cave_bundles_all_parts() {
        let cave = build_cave(&small_config()).unwrap();
        assert!(find_regions(&cave.grid, Tile::Floor).len() <= 1);
        assert_eq!(cave.ceiling.uvs.len(), cave.ceiling.vertex_count());
        assert!(!cave.outlines.is_empty());
        let edges: usize = cave.outlines.iter().map(Outline::len).sum();
        assert_eq!(cave.walls.triangle_count(), edges * 2);
    }

    #[test]
    fn test_combined_mesh_holds_ceiling_and_walls() {
        let cave = build_cave(&small_config()).unwrap();
        let ceiling_vertices = cave.ceiling.vertex_count();
        assert_eq!(cave.combined.vertex_count(), ceiling_vertices + cave.walls.vertex_count());
        assert_eq!(
            cave.combined.triangle_count(),
            cave.ceiling.triangle_count() + cave.walls.triangle_count()
        );
        assert_eq!(cave.combined.uvs.len(), cave.combined.vertex_count());

        // Wall triangles follow the ceiling's, shifted past its vertices.
        let wall_part = &cave.combined.triangles[cave.ceiling.triangles.len()..];
        let shifted: Vec<u32> = cave.walls.triangles.iter().map(|&i| i + ceiling_vertices as u32).collect();
        assert_eq!(wall_part, shifted.as_slice());
    }

    #[test]
    fn test_origin_offsets_mesh() {
        let mut config = small_config();
        config.mesh.origin = [100.0, 0.0, 0.0];
        let cave = build_cave(&config).unwrap();
        assert!(cave.ceiling.vertices.iter().all(|v| v.x >= 100.0));
    }

    #[test]
    fn test_invalid_generation_is_reported() {
        let mut config = small_config();
        config.generation.density = 2.0;
        assert_eq!(build_cave(&config).err(), Some(MapError::InvalidDensity(2.0)));
    }
}
