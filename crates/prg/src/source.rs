//! The "produce N pseudo-random bytes" capability and its implementations.

use std::sync::{Arc, Mutex};

use rand::TryRngCore;
use rand::rngs::OsRng;
use tracing::warn;

use crate::error::PrgError;

/// Anything that can fill a buffer with pseudo-random bytes.
///
/// Label construction is generic over this trait, so the same code path
/// serves non-reproducible production labels ([`SystemEntropy`]) and
/// replayable ones ([`SeedPrg`](crate::SeedPrg)).
pub trait RandomSource {
    /// Overwrites every byte of `dest`.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), PrgError>;

    /// Returns `n` fresh bytes.
    fn take(&mut self, n: usize) -> Result<Vec<u8>, PrgError> {
        let mut out = vec![0u8; n];
        self.fill(&mut out)?;
        Ok(out)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), PrgError> {
        (**self).fill(dest)
    }
}

/// Operating system entropy. Every draw is independent and unrepeatable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl RandomSource for SystemEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), PrgError> {
        OsRng.try_fill_bytes(dest).map_err(|err| {
            warn!(%err, len = dest.len(), "system entropy source failed");
            PrgError::Entropy(err)
        })
    }
}

/// A source shared between owners, with every draw serialized by a lock.
///
/// Each call to [`RandomSource::fill`] takes the lock once, so a single
/// draw is always a contiguous slice of the underlying stream. The order in
/// which concurrent owners get their slices is up to the scheduler.
#[derive(Debug)]
pub struct SharedSource<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedSource<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> SharedSource<S> {
    /// Wraps `source` for shared use.
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(source)),
        }
    }

    /// Runs `f` with exclusive access to the source, for callers that need
    /// several draws to stay contiguous.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> Result<R, PrgError> {
        let mut guard = self.inner.lock().map_err(|_| PrgError::Poisoned)?;
        Ok(f(&mut *guard))
    }
}

impl<S: RandomSource> RandomSource for SharedSource<S> {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), PrgError> {
        self.with(|source| source.fill(dest))?
    }
}
