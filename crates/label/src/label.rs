//! The label value type.

use std::fmt;

use ckt_prg::{RandomSource, SystemEntropy};
use num_bigint::BigUint;
use tracing::trace;

use crate::config::LabelConfig;
use crate::encoding::{self, FIXED_INT_BYTES};
use crate::error::LabelError;

/// An opaque fixed-width value standing in for one boolean on one wire.
///
/// The width is taken from the [`LabelConfig`] at construction and never
/// changes. `represents` is kept for the layer that builds circuits and tests;
/// it is not secret-safe and is left out of the `Debug` and `Display` output.
/// Pairing rules such as complementary point-and-permute bits are up to the
/// caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Label {
    bytes: Box<[u8]>,
    represents: bool,
    pp_bit: Option<bool>,
}

impl Label {
    /// Draws a new label from `source`.
    ///
    /// Pass a [`SeedPrg`](ckt_prg::SeedPrg) (usually as `&mut prg`) for a
    /// label that can be replayed from the seed.
    pub fn new<S: RandomSource>(
        config: LabelConfig,
        represents: bool,
        pp_bit: Option<bool>,
        mut source: S,
    ) -> Result<Self, LabelError> {
        let bytes = source.take(config.num_bytes())?.into_boxed_slice();
        trace!(width = bytes.len(), "drew label");
        Ok(Self {
            bytes,
            represents,
            pp_bit,
        })
    }

    /// Draws a new label from operating system entropy.
    pub fn random(
        config: LabelConfig,
        represents: bool,
        pp_bit: Option<bool>,
    ) -> Result<Self, LabelError> {
        Self::new(config, represents, pp_bit, SystemEntropy)
    }

    /// Rebuilds a label from raw bytes, e.g. after transport.
    pub fn from_bytes(
        config: LabelConfig,
        bytes: &[u8],
        represents: bool,
        pp_bit: Option<bool>,
    ) -> Result<Self, LabelError> {
        if bytes.len() != config.num_bytes() {
            return Err(LabelError::WidthMismatch {
                expected: config.num_bytes(),
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes: bytes.into(),
            represents,
            pp_bit,
        })
    }

    /// The obfuscated value.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the label, returning its bytes.
    pub fn into_bytes(self) -> Box<[u8]> {
        self.bytes
    }

    /// Width in bytes.
    pub fn width(&self) -> usize {
        self.bytes.len()
    }

    /// The clear-text value this label stands for.
    pub fn represents(&self) -> bool {
        self.represents
    }

    /// The point-and-permute bit, if one was assigned.
    pub fn pp_bit(&self) -> Option<bool> {
        self.pp_bit
    }

    /// Big-endian unsigned interpretation of the bytes.
    pub fn as_integer(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }

    /// URL-safe base64 form of the bytes.
    pub fn to_base64(&self) -> String {
        encoding::encode_base64(&self.bytes)
    }

    /// Standard base32 form of the bytes.
    pub fn to_base32(&self) -> String {
        encoding::encode_base32(&self.bytes)
    }

    /// Encodes `n` as 32 big-endian bytes; see [`encoding::int_to_fixed_bytes`].
    pub fn int_to_fixed_bytes(n: &BigUint) -> Result<[u8; FIXED_INT_BYTES], LabelError> {
        encoding::int_to_fixed_bytes(n)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("value", &self.to_base64())
            .field("pp_bit", &self.pp_bit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use ckt_prg::{PrgError, SeedPrg, SharedSource};
    use hex_literal::hex;
    use rand::Rng;
    use rand_chacha::ChaCha20Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::encoding::{decode_base32, decode_base64};

    fn counting_seed() -> Vec<u8> {
        (0u8..32).collect()
    }

    /// Source that always fails, standing in for an unavailable entropy pool.
    struct BrokenSource;

    impl RandomSource for BrokenSource {
        fn fill(&mut self, _dest: &mut [u8]) -> Result<(), PrgError> {
            Err(PrgError::Poisoned)
        }
    }

    #[test]
    fn test_seeded_label_vector() {
        let mut prg = SeedPrg::new(&counting_seed()).unwrap();
        let config = LabelConfig::default();

        let zero = Label::new(config, false, Some(true), &mut prg).unwrap();
        let one = Label::new(config, true, Some(false), &mut prg).unwrap();

        assert_eq!(
            zero.bytes(),
            hex!("f29000b62a499fd0a9f39a6add2e7780f05d76ae4ab99fe5a6f69b3148c2363d")
        );
        assert_eq!(
            one.bytes(),
            hex!("0ebcb5deb52c83bd08a8a935182c9199d24356532881602f809eb383c5ff5d56")
        );
        assert_eq!(zero.to_string(), "8pAAtipJn9Cp85pq3S53gPBddq5KuZ_lpvabMUjCNj0=");
        assert_eq!(prg.position(), 64);
    }

    #[test]
    fn test_reproducible_label() {
        let seed = counting_seed();
        let config = LabelConfig::default();

        let a = Label::new(config, true, None, SeedPrg::new(&seed).unwrap()).unwrap();
        let b = Label::new(config, true, None, SeedPrg::new(&seed).unwrap()).unwrap();
        assert_eq!(a.bytes(), b.bytes());
        assert_eq!(a, b);
    }

    #[test]
    fn test_label_set_replays_from_seed() {
        let seed = [0x11u8; 24];
        let config = LabelConfig::new(16).unwrap();

        let build = || {
            let mut prg = SeedPrg::new(&seed).unwrap();
            (0..100)
                .map(|i| Label::new(config, i % 2 == 1, None, &mut prg).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_width_invariant() {
        let mut rng = ChaCha20Rng::from_seed([0u8; 32]);
        let mut prg = SeedPrg::new(&[0x22u8; 16]).unwrap();

        for _ in 0..50 {
            let config = LabelConfig::new(rng.random_range(1..100)).unwrap();
            let seeded = Label::new(config, false, None, &mut prg).unwrap();
            let random = Label::random(config, true, None).unwrap();
            assert_eq!(seeded.width(), config.num_bytes());
            assert_eq!(random.bytes().len(), config.num_bytes());
        }
    }

    #[test]
    fn test_fields_stored_as_given() {
        let config = LabelConfig::default();
        for (represents, pp_bit) in [(false, None), (true, Some(false)), (false, Some(true))] {
            let label = Label::random(config, represents, pp_bit).unwrap();
            assert_eq!(label.represents(), represents);
            assert_eq!(label.pp_bit(), pp_bit);
        }
    }

    #[test]
    fn test_random_labels_do_not_collide() {
        let config = LabelConfig::default();
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let label = Label::random(config, false, None).unwrap();
            assert!(seen.insert(label.into_bytes()), "duplicate label");
        }
    }

    #[test]
    fn test_encodings_round_trip() {
        let mut prg = SeedPrg::new(&[0x33u8; 32]).unwrap();
        for width in [1, 5, 16, 31, 32, 33, 64] {
            let config = LabelConfig::new(width).unwrap();
            let label = Label::new(config, true, None, &mut prg).unwrap();
            assert_eq!(decode_base64(&label.to_base64()).unwrap(), label.bytes());
            assert_eq!(decode_base32(&label.to_base32()).unwrap(), label.bytes());
        }
    }

    #[test]
    fn test_docstring_vector() {
        let bytes = hex!("798cc443999c1d26a352db42ce702dc5e9523dc1d8ae717de06380d867ac5f96");
        let label = Label::from_bytes(LabelConfig::default(), &bytes, false, Some(true)).unwrap();
        assert_eq!(label.to_base64(), "eYzEQ5mcHSajUttCznAtxelSPcHYrnF94GOA2GesX5Y=");
        assert_eq!(
            label.to_base32(),
            "PGGMIQ4ZTQOSNI2S3NBM44BNYXUVEPOB3CXHC7PAMOANQZ5ML6LA===="
        );
    }

    #[test]
    fn test_integer_round_trip() {
        let mut prg = SeedPrg::new(&[0x44u8; 16]).unwrap();
        let config = LabelConfig::default();
        for _ in 0..100 {
            let label = Label::new(config, false, None, &mut prg).unwrap();
            let n = label.as_integer();
            assert_eq!(Label::int_to_fixed_bytes(&n).unwrap(), label.bytes());
        }

        let zero = Label::from_bytes(config, &[0u8; 32], false, None).unwrap();
        assert_eq!(zero.as_integer(), BigUint::from(0u8));
        assert_eq!(Label::int_to_fixed_bytes(&zero.as_integer()).unwrap(), [0u8; 32]);
    }

    #[test]
    fn test_from_bytes_checks_width() {
        let config = LabelConfig::default();
        match Label::from_bytes(config, &[0u8; 31], true, None) {
            Err(LabelError::WidthMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (32, 31));
            }
            other => panic!("expected WidthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_source_failure_propagates() {
        let err = Label::new(LabelConfig::default(), true, None, BrokenSource).unwrap_err();
        assert!(matches!(err, LabelError::Source(PrgError::Poisoned)));
    }

    #[test]
    fn test_shared_stream_labels() {
        let seed = [0x55u8; 16];
        let config = LabelConfig::default();
        let shared = SharedSource::new(SeedPrg::new(&seed).unwrap());

        let a = Label::new(config, false, None, shared.clone()).unwrap();
        let b = Label::new(config, true, None, shared.clone()).unwrap();

        let mut reference = SeedPrg::new(&seed).unwrap();
        assert_eq!(a.bytes(), reference.next_bytes(32));
        assert_eq!(b.bytes(), reference.next_bytes(32));
    }

    #[test]
    fn test_debug_omits_truth_value() {
        let label = Label::from_bytes(LabelConfig::new(3).unwrap(), &[0xfb, 0xff, 0xbf], true, None)
            .unwrap();
        let rendered = format!("{:?}", label);
        assert!(rendered.contains("-_-_"));
        assert!(!rendered.contains("represents"));
    }
}
