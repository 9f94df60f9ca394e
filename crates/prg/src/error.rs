//! Errors raised by randomness sources.

use rand::rand_core::OsError;

/// Errors produced while creating or drawing from a [`RandomSource`](crate::RandomSource).
#[derive(Debug, thiserror::Error)]
pub enum PrgError {
    /// Seed length does not match any AES key size.
    #[error("invalid seed length {len}, expected 16, 24 or 32 bytes")]
    InvalidSeedLength {
        /// Length of the rejected seed in bytes.
        len: usize,
    },

    /// A choice was requested from an empty sequence.
    #[error("cannot choose from an empty sequence")]
    EmptySequence,

    /// The operating system entropy source failed.
    #[error("system entropy source failed: {0}")]
    Entropy(#[source] OsError),

    /// A thread panicked while holding a shared source.
    #[error("shared randomness source lock poisoned")]
    Poisoned,
}
