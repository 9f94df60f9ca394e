//! Randomness sources for label generation.
//!
//! [`SeedPrg`] is a replayable AES-CTR byte stream, [`SystemEntropy`] reads
//! the operating system RNG, and [`SharedSource`] serializes access to either
//! one. All of them implement [`RandomSource`].

mod error;
mod seed;
mod source;

pub use error::PrgError;
pub use seed::{KeySize, SeedPrg};
pub use source::{RandomSource, SharedSource, SystemEntropy};
