//! Map generation error types.

use crate::tile::Coord;

/// Errors raised by map generation.
///
/// Configuration variants are returned by the call that receives the bad
/// value. [`MapError::TunnelWalkExhausted`] signals an internal defect and
/// aborts the generation that hit it.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MapError {
    /// Grid length or width was zero.
    #[error("invalid grid dimensions {length}x{width}: both must be positive")]
    InvalidDimensions { length: usize, width: usize },

    /// Fill density outside `[0, 1]`.
    #[error("invalid fill density {0}: must lie in [0, 1]")]
    InvalidDensity(f64),

    /// Tunnel radius negative or not finite.
    #[error("invalid tunnel radius {0}: must be finite and non-negative")]
    InvalidRadius(f32),

    /// Random-walk variance outside `[0, 1)`.
    #[error("invalid walk variance {0}: must lie in [0, 1)")]
    InvalidVariance(f64),

    /// Smoothing threshold outside the 3x3 neighbourhood size.
    #[error("invalid smoothing threshold {0}: must lie in 0..=8")]
    InvalidThreshold(u8),

    /// A tunnel walk did not reach its goal within its step budget.
    #[error("tunnel walk from {start:?} to {end:?} did not terminate within {steps} steps")]
    TunnelWalkExhausted { start: Coord, end: Coord, steps: usize },
}
