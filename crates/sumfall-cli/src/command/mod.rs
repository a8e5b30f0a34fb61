use clap::{Parser, Subcommand};

use crate::logger;

use self::{decide::DecideArg, run::RunArg};

mod decide;
mod run;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log more details to stderr (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game over stdin/stdout (default)
    Run(#[clap(flatten)] RunArg),
    /// Decide a single turn read from files and report it as JSON
    Decide(#[clap(flatten)] DecideArg),
}

/// Options shared by every mode that makes decisions.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PolicyArg {
    /// Seed for the placement policy's random generator
    #[arg(long, default_value_t = PolicyArg::DEFAULT_SEED)]
    seed: u64,
    /// Number of packs in the schedule read before the first turn
    #[arg(long, default_value_t = sumfall_engine::PackSchedule::MAX_TURNS)]
    max_turns: usize,
}

impl PolicyArg {
    const DEFAULT_SEED: u64 = 123_456;
}

impl Default for PolicyArg {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            max_turns: sumfall_engine::PackSchedule::MAX_TURNS,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logger::init(logger::level_filter(args.verbose, args.quiet))?;
    match args.mode.unwrap_or(Mode::Run(RunArg::default())) {
        Mode::Run(arg) => run::run(&arg)?,
        Mode::Decide(arg) => decide::run(&arg)?,
    }
    Ok(())
}
