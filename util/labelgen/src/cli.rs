use clap::{Parser, Subcommand, ValueEnum};

use ckt_label::DEFAULT_NUM_BYTES;

/// Label generator - replay and sanity-check garbled circuit labels
#[derive(Parser, Debug)]
#[command(name = "labelgen")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Rebuild a label set from a seed and print it with its digest
    Replay(ReplayCommand),
    /// Build labels from system entropy and check for collisions
    Dupecheck(DupecheckCommand),
    /// Replay a single choice from a seeded stream
    Choose(ChooseCommand),
}

#[derive(Parser, Debug)]
pub(crate) struct ReplayCommand {
    /// Seed as hex, 16, 24 or 32 bytes
    #[arg(short = 's', long, env = "CKT_SEED", value_name = "HEX")]
    pub(crate) seed: String,

    /// Number of labels to build
    #[arg(short = 'n', long, default_value_t = 8, value_name = "LABELS")]
    pub(crate) count: usize,

    /// Label width in bytes
    #[arg(
        short = 'w',
        long,
        env = "CKT_LABEL_WIDTH",
        default_value_t = DEFAULT_NUM_BYTES,
        value_name = "BYTES"
    )]
    pub(crate) width: usize,

    /// Output encoding for each label
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Base64)]
    pub(crate) format: Format,

    /// Assign complementary point-and-permute bits to each wire pair
    #[arg(long)]
    pub(crate) pp: bool,
}

#[derive(Parser, Debug)]
pub(crate) struct DupecheckCommand {
    /// Number of labels to build
    #[arg(short = 'n', long, default_value_t = 10_000, value_name = "LABELS")]
    pub(crate) count: usize,

    /// Label width in bytes
    #[arg(
        short = 'w',
        long,
        env = "CKT_LABEL_WIDTH",
        default_value_t = DEFAULT_NUM_BYTES,
        value_name = "BYTES"
    )]
    pub(crate) width: usize,
}

#[derive(Parser, Debug)]
pub(crate) struct ChooseCommand {
    /// Seed as hex, 16, 24 or 32 bytes
    #[arg(short = 's', long, env = "CKT_SEED", value_name = "HEX")]
    pub(crate) seed: String,

    /// Reject out-of-range draws instead of reducing modulo the length
    #[arg(long)]
    pub(crate) uniform: bool,

    /// Items to choose from
    #[arg(value_name = "ITEM")]
    pub(crate) items: Vec<String>,
}

/// Text encoding for printed labels.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// URL-safe base64
    Base64,
    /// Standard base32
    Base32,
    /// Lowercase hex
    Hex,
    /// Big-endian unsigned integer
    Int,
}

impl Cli {
    pub(crate) fn parse_args() -> Self {
        Self::parse()
    }
}
