//! Deterministic RNG streams derived from a master seed.
//!
//! Each generation phase draws from its own ChaCha8 stream so that changing
//! how much randomness one phase consumes never shifts another phase.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Named random streams used by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeedStream {
    /// Initial random fill of the grid.
    Fill,
    /// Randomized tunnel walks.
    Tunnel,
}

impl SeedStream {
    fn label(self) -> &'static str {
        match self {
            SeedStream::Fill => "fill",
            SeedStream::Tunnel => "tunnel",
        }
    }
}

/// Derive a u64 seed for `stream` from the master seed.
///
/// `DefaultHasher::new()` uses fixed SipHash keys, so the result is stable
/// across runs and threads.
pub fn derive_seed(master: u64, stream: SeedStream) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stream.label().hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for one stream of one generation request.
pub fn stream_rng(master: u64, stream: SeedStream) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(master, stream))
}
