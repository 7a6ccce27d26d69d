//! Configuration for cave generation.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line via clap.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, TunnelArg};
pub use config::{Config, DebugConfig, MeshConfig, default_config_dir};
pub use error::ConfigError;
