//! Collision check over labels drawn from system entropy.

use ahash::AHashSet;
use anyhow::{Result, bail};
use ckt_label::{Label, LabelConfig};
use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::cli::DupecheckCommand;

/// Builds `count` entropy-backed labels in parallel and returns how many
/// repeated an earlier one.
pub(crate) fn count_duplicates(
    config: LabelConfig,
    count: usize,
    pb: &ProgressBar,
) -> Result<usize> {
    let labels = (0..count)
        .into_par_iter()
        .map(|i| Label::random(config, i % 2 == 1, None))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = AHashSet::with_capacity(count);
    let mut duplicates = 0;
    for label in labels {
        if !seen.insert(label.into_bytes()) {
            duplicates += 1;
        }
        pb.inc(1);
    }
    Ok(duplicates)
}

pub(crate) fn run_dupecheck(args: DupecheckCommand) -> Result<()> {
    let config = LabelConfig::new(args.width)?;
    info!(count = args.count, width = args.width, "checking entropy labels for collisions");

    let pb = ProgressBar::new(args.count as u64);
    let duplicates = count_duplicates(config, args.count, &pb)?;
    pb.finish_and_clear();

    if duplicates > 0 {
        warn!(duplicates, "label collision");
        bail!("✗ {} of {} labels collided", duplicates, args.count);
    }

    println!("✓ {} labels of {} bytes, no collisions", args.count, args.width);
    Ok(())
}
