//! Fixed-width labels for garbled circuits.
//!
//! A [`Label`] stands in for one boolean on one wire. Its bytes come from any
//! [`RandomSource`](ckt_prg::RandomSource): operating system entropy for
//! production, or a [`SeedPrg`](ckt_prg::SeedPrg) when the whole label set has
//! to be replayable from a seed. How labels are paired, permuted and
//! encrypted into gate tables is left to the garbling layer.

mod config;
pub mod encoding;
mod error;
mod label;

pub use config::{DEFAULT_NUM_BYTES, LabelConfig};
pub use error::{DecodeError, LabelError};
pub use label::Label;

#[cfg(test)]
mod tests {
    // Fixes a compiler warning
    use criterion as _;
}
