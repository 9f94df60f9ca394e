//! Label width configuration.

use crate::error::LabelError;

/// Default label width: 256 bits.
pub const DEFAULT_NUM_BYTES: usize = 32;

/// Width of the labels produced for one run.
///
/// Resolve this once before building any label and hand the same value to
/// every constructor. Labels built under different widths are not
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelConfig {
    num_bytes: usize,
}

impl LabelConfig {
    /// Creates a configuration for `num_bytes`-wide labels.
    pub fn new(num_bytes: usize) -> Result<Self, LabelError> {
        if num_bytes == 0 {
            return Err(LabelError::ZeroWidth);
        }
        Ok(Self { num_bytes })
    }

    /// Label width in bytes.
    pub const fn num_bytes(&self) -> usize {
        self.num_bytes
    }

    /// Label width in bits.
    pub const fn num_bits(&self) -> usize {
        self.num_bytes * 8
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            num_bytes: DEFAULT_NUM_BYTES,
        }
    }
}
