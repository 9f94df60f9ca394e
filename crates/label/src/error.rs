//! Label errors.

use ckt_prg::PrgError;

/// Errors produced while building or decoding labels.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// The randomness source failed.
    #[error(transparent)]
    Source(#[from] PrgError),

    /// A label width of zero bytes was configured.
    #[error("label width must be at least one byte")]
    ZeroWidth,

    /// Raw label bytes did not match the configured width.
    #[error("label has {actual} bytes, expected {expected}")]
    WidthMismatch {
        /// Configured width.
        expected: usize,
        /// Width of the rejected buffer.
        actual: usize,
    },

    /// An integer does not fit the fixed-width encoding.
    #[error("integer needs {bits} bits, fixed-width encoding holds at most 256")]
    IntegerTooLarge {
        /// Bit length of the rejected integer.
        bits: u64,
    },

    /// Text could not be decoded back into label bytes.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors decoding the textual label encodings.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Malformed URL-safe base64.
    #[error("invalid base64 label: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Malformed base32.
    #[error("invalid base32 label: {0}")]
    Base32(#[from] data_encoding::DecodeError),
}
