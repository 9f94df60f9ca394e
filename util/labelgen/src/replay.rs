//! Seeded replay of label sets and choices.

use anyhow::{Context, Result};
use ckt_label::{Label, LabelConfig};
use ckt_prg::SeedPrg;
use tracing::info;

use crate::cli::{ChooseCommand, Format, ReplayCommand};

/// Parses a hex seed into a keyed stream.
pub(crate) fn seeded_prg(seed_hex: &str) -> Result<SeedPrg> {
    let seed = hex::decode(seed_hex.trim()).context("seed is not valid hex")?;
    SeedPrg::new(&seed).context("cannot key stream from seed")
}

/// Builds `count` labels from one stream.
///
/// Labels come in wire pairs: even indices represent false, odd ones true.
/// With `pp` set, each pair first draws one point-and-permute bit from the
/// stream for its false label; the true label gets the complement.
pub(crate) fn build_labels(
    prg: &mut SeedPrg,
    config: LabelConfig,
    count: usize,
    pp: bool,
) -> Result<Vec<Label>> {
    let mut labels = Vec::with_capacity(count);
    let mut pp_bit = None;
    for i in 0..count {
        let represents = i % 2 == 1;
        if pp {
            pp_bit = if represents {
                pp_bit.map(|bit: bool| !bit)
            } else {
                Some(*prg.choice(&[false, true])?)
            };
        }
        labels.push(Label::new(config, represents, pp_bit, &mut *prg)?);
    }
    Ok(labels)
}

/// Hash over every label's bytes, in order.
pub(crate) fn digest(labels: &[Label]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    for label in labels {
        hasher.update(label.bytes());
    }
    hasher.finalize()
}

fn render(label: &Label, format: Format) -> String {
    match format {
        Format::Base64 => label.to_base64(),
        Format::Base32 => label.to_base32(),
        Format::Hex => hex::encode(label.bytes()),
        Format::Int => label.as_integer().to_string(),
    }
}

pub(crate) fn run_replay(args: ReplayCommand) -> Result<()> {
    let config = LabelConfig::new(args.width)?;
    let mut prg = seeded_prg(&args.seed)?;
    info!(
        count = args.count,
        width = args.width,
        key_size = ?prg.key_size(),
        "replaying labels"
    );

    let labels = build_labels(&mut prg, config, args.count, args.pp)?;
    for (i, label) in labels.iter().enumerate() {
        let pp = match label.pp_bit() {
            Some(bit) => format!(" pp={}", u8::from(bit)),
            None => String::new(),
        };
        println!(
            "wire {} value {}{} {}",
            i / 2,
            u8::from(label.represents()),
            pp,
            render(label, args.format)
        );
    }

    println!("digest: {}", digest(&labels).to_hex());
    println!("consumed: {} bytes", prg.position());
    Ok(())
}

pub(crate) fn run_choose(args: ChooseCommand) -> Result<()> {
    let mut prg = seeded_prg(&args.seed)?;
    let picked = if args.uniform {
        prg.choice_uniform(&args.items)
    } else {
        prg.choice(&args.items)
    };
    let picked = picked.context("no item chosen")?;
    println!("{}", picked);
    Ok(())
}
