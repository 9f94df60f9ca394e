//! Command line tool for replaying and checking garbled circuit labels.

mod cli;
mod dupecheck;
mod replay;

use anyhow::Result;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse_args();

    match args.command {
        Command::Replay(replay_args) => replay::run_replay(replay_args),
        Command::Dupecheck(dupecheck_args) => dupecheck::run_dupecheck(dupecheck_args),
        Command::Choose(choose_args) => replay::run_choose(choose_args),
    }
}
