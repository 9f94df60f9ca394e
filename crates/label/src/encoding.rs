//! Text and integer encodings of label bytes.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use data_encoding::BASE32;
use num_bigint::BigUint;

use crate::error::{DecodeError, LabelError};

/// Width of the fixed-size integer encoding, in bytes.
pub const FIXED_INT_BYTES: usize = 32;

/// Padded URL-safe base64 (RFC 4648 §5).
pub fn encode_base64(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}

/// Inverse of [`encode_base64`].
pub fn decode_base64(text: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(URL_SAFE.decode(text)?)
}

/// Padded base32 with the standard alphabet (RFC 4648 §6).
pub fn encode_base32(bytes: &[u8]) -> String {
    BASE32.encode(bytes)
}

/// Inverse of [`encode_base32`].
pub fn decode_base32(text: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(BASE32.decode(text.as_bytes())?)
}

/// Encodes `n` as exactly 32 big-endian bytes, zero-padded on the left.
///
/// Integers wider than 256 bits are rejected rather than truncated.
pub fn int_to_fixed_bytes(n: &BigUint) -> Result<[u8; FIXED_INT_BYTES], LabelError> {
    let bits = n.bits();
    if bits > (FIXED_INT_BYTES * 8) as u64 {
        return Err(LabelError::IntegerTooLarge { bits });
    }

    let be = n.to_bytes_be();
    let mut out = [0u8; FIXED_INT_BYTES];
    out[FIXED_INT_BYTES - be.len()..].copy_from_slice(&be);
    Ok(out)
}
