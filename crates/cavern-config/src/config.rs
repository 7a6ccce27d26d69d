//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use cavern_map::CaveParams;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Cave generation parameters.
    pub generation: CaveParams,
    /// Mesh placement and extrusion.
    pub mesh: MeshConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Mesh configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// World size of one tile.
    pub cell_size: f32,
    /// World position of tile (0, 0).
    pub origin: [f32; 3],
    /// Depth of the extruded walls below the ceiling mesh.
    pub wall_height: f32,
    /// Texture repeats across the ceiling mesh.
    pub uv_tiling: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Print the finished map as ASCII after generation.
    pub print_map: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            origin: [0.0; 3],
            wall_height: 5.0,
            uv_tiling: 10.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            print_map: false,
        }
    }
}

impl MeshConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::InvalidMesh { field, reason });
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return invalid("cell_size", "must be finite and positive");
        }
        if !self.origin.iter().all(|c| c.is_finite()) {
            return invalid("origin", "must be finite");
        }
        if !(self.wall_height.is_finite() && self.wall_height >= 0.0) {
            return invalid("wall_height", "must be finite and non-negative");
        }
        if !self.uv_tiling.is_finite() {
            return invalid("uv_tiling", "must be finite");
        }
        Ok(())
    }
}

/// Default config directory: `<platform config dir>/cavern`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cavern"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-reads the file: `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects settings generation or meshing could not honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()?;
        self.mesh.validate()
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavern_map::{MapError, TunnelStyle};

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("density: 0.45"));
        assert!(ron_str.contains("tunnel: Direct"));
        assert!(ron_str.contains("wall_height: 5.0"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(generation: (seed: 9))").unwrap();
        assert_eq!(config.generation.seed, 9);
        assert_eq!(config.generation.length, 64);
        assert_eq!(config.mesh, MeshConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_random_walk_style_parses() {
        let config: Config =
            ron::from_str("(generation: (tunnel: RandomWalk(variance: 0.3)))").unwrap();
        assert_eq!(config.generation.tunnel, TunnelStyle::RandomWalk { variance: 0.3 });
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.generation.seed = 1234;
        config.generation.tunnel = TunnelStyle::RandomWalk { variance: 0.5 };
        config.mesh.origin = [1.0, 2.0, 3.0];
        config.debug.print_map = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("cavern");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.generation.width = 128;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.generation.width), Some(128));
        assert!(modified.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.generation.density = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Generation(MapError::InvalidDensity(_)))
        ));

        let mut config = Config::default();
        config.mesh.cell_size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMesh { field: "cell_size", .. })
        ));
    }
}
