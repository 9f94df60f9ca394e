//! Seeded AES-CTR keystream generator.
//!
//! The keystream is the encryption of an all-zero plaintext under the seed in
//! counter mode, with a 128-bit big-endian counter starting at zero. Because
//! the counter only moves forward, every byte handed out is a pure function of
//! the seed and of how many bytes were requested before it.

use std::fmt;

use aes::{Aes128, Aes192, Aes256};
use ctr::Ctr128BE;
use ctr::cipher::{InvalidLength, KeyIvInit, StreamCipher};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

use crate::error::PrgError;
use crate::source::RandomSource;

/// Initial counter block. The nonce half is fixed at zero as well.
const ZERO_IV: [u8; 16] = [0u8; 16];

/// AES variant selected by the seed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    /// 16-byte seed.
    Aes128,
    /// 24-byte seed.
    Aes192,
    /// 32-byte seed.
    Aes256,
}

impl KeySize {
    /// Maps a seed length in bytes to a key size.
    pub const fn from_seed_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128),
            24 => Some(Self::Aes192),
            32 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Key size in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }
}

enum Keystream {
    Aes128(Ctr128BE<Aes128>),
    Aes192(Ctr128BE<Aes192>),
    Aes256(Ctr128BE<Aes256>),
}

impl Keystream {
    fn new(size: KeySize, seed: &[u8]) -> Result<Self, PrgError> {
        let invalid = |_: InvalidLength| PrgError::InvalidSeedLength { len: seed.len() };
        Ok(match size {
            KeySize::Aes128 => {
                Self::Aes128(Ctr128BE::new_from_slices(seed, &ZERO_IV).map_err(invalid)?)
            }
            KeySize::Aes192 => {
                Self::Aes192(Ctr128BE::new_from_slices(seed, &ZERO_IV).map_err(invalid)?)
            }
            KeySize::Aes256 => {
                Self::Aes256(Ctr128BE::new_from_slices(seed, &ZERO_IV).map_err(invalid)?)
            }
        })
    }

    fn apply(&mut self, buf: &mut [u8]) {
        match self {
            Self::Aes128(c) => c.apply_keystream(buf),
            Self::Aes192(c) => c.apply_keystream(buf),
            Self::Aes256(c) => c.apply_keystream(buf),
        }
    }
}

/// Deterministic, replayable byte stream keyed by a seed.
///
/// Two instances built from the same seed hand out identical bytes for the
/// same sequence of requests, however those requests are split up. There is
/// no way to rewind; replaying means building a fresh instance.
///
/// Drawing needs `&mut self`. Share one stream between threads through
/// [`SharedSource`](crate::SharedSource), or give each worker its own seed.
pub struct SeedPrg {
    keystream: Keystream,
    key_size: KeySize,
    position: u64,
}

impl SeedPrg {
    /// Creates a stream from a 16, 24 or 32 byte seed.
    pub fn new(seed: &[u8]) -> Result<Self, PrgError> {
        let key_size = KeySize::from_seed_len(seed.len())
            .ok_or(PrgError::InvalidSeedLength { len: seed.len() })?;
        let keystream = Keystream::new(key_size, seed)?;
        debug!(key_bits = key_size.bits(), "keyed seed prg");

        Ok(Self {
            keystream,
            key_size,
            position: 0,
        })
    }

    /// AES variant in use.
    pub fn key_size(&self) -> KeySize {
        self.key_size
    }

    /// Number of keystream bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Overwrites `dest` with the next `dest.len()` keystream bytes.
    pub fn fill_keystream(&mut self, dest: &mut [u8]) {
        dest.fill(0);
        self.keystream.apply(dest);
        self.position += dest.len() as u64;
        trace!(len = dest.len(), position = self.position, "drew keystream bytes");
    }

    /// Returns the next `n` keystream bytes.
    pub fn next_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.fill_keystream(&mut out);
        out
    }

    /// Returns an integer in `[0, 2^bits)`.
    ///
    /// Draws `ceil(bits / 8)` bytes, reads them big-endian and masks off the
    /// high bits beyond `bits`. Zero bits consumes nothing and yields zero.
    pub fn next_bounded_int(&mut self, bits: u64) -> BigUint {
        let bytes = self.next_bytes(bits.div_ceil(8) as usize);
        let mask = (BigUint::from(1u8) << bits) - 1u8;
        BigUint::from_bytes_be(&bytes) & mask
    }

    /// Same draw as [`Self::next_bounded_int`] for widths that fit a `u64`.
    fn next_bounded_u64(&mut self, bits: u32) -> u64 {
        debug_assert!(bits <= u64::BITS);
        let mut buf = [0u8; 8];
        let len = bits.div_ceil(8) as usize;
        self.fill_keystream(&mut buf[8 - len..]);
        let value = u64::from_be_bytes(buf);
        if bits == u64::BITS {
            value
        } else {
            value & ((1u64 << bits) - 1)
        }
    }

    /// Picks one element of `items`.
    ///
    /// The index is a `bit_length(len)`-bit draw reduced modulo `len`, so
    /// lower indices are favoured whenever `len` is not a power of two. Use
    /// [`Self::choice_uniform`] when the selection has to be unbiased.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, PrgError> {
        let (len, bits) = index_width(items)?;
        let idx = self.next_bounded_u64(bits) % len;
        Ok(&items[idx as usize])
    }

    /// Picks one element of `items` uniformly by rejecting out-of-range draws.
    ///
    /// Consumes the same `bit_length(len)`-bit draws as [`Self::choice`], at
    /// least one and on average fewer than two.
    pub fn choice_uniform<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, PrgError> {
        let (len, bits) = index_width(items)?;
        loop {
            let idx = self.next_bounded_u64(bits);
            if idx < len {
                return Ok(&items[idx as usize]);
            }
        }
    }
}

/// Length of a non-empty slice and its bit length.
fn index_width<T>(items: &[T]) -> Result<(u64, u32), PrgError> {
    if items.is_empty() {
        return Err(PrgError::EmptySequence);
    }
    let len = items.len() as u64;
    Ok((len, u64::BITS - len.leading_zeros()))
}

impl fmt::Debug for SeedPrg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedPrg")
            .field("key_size", &self.key_size)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl RandomSource for SeedPrg {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), PrgError> {
        self.fill_keystream(dest);
        Ok(())
    }
}

/// Lets a seeded stream drive `rand` APIs reproducibly.
impl RngCore for SeedPrg {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_keystream(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_keystream(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.fill_keystream(dst);
    }
}

impl CryptoRng for SeedPrg {}
