//! External oracles consulted by the battle core.
mod rng;

pub use rng::{FixedRoll, PcgRng, RngOracle, compute_seed};
