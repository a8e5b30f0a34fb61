use std::io::{self, BufRead, Write};

use anyhow::Context as _;
use sumfall_engine::{
    BoardGeometry, Command, DropOutcome, Pack, PackSchedule, PlacementPolicy, RandomPolicy,
    TurnState, simulate_drop,
};

use crate::protocol::{self, TokenReader};

use super::PolicyArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    /// Name announced to the game server before the first turn
    #[arg(long, default_value = RunArg::DEFAULT_NAME)]
    name: String,
    #[clap(flatten)]
    policy: PolicyArg,
}

impl RunArg {
    const DEFAULT_NAME: &'static str = "sumfall";
}

impl Default for RunArg {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_owned(),
            policy: PolicyArg::default(),
        }
    }
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg { name, policy } = arg;
    let PolicyArg { seed, max_turns } = policy;

    log::info!("starting {name} (seed {seed})");
    let mut policy = RandomPolicy::with_seed(*seed);
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let turns = play(stdin, &mut stdout, name, *max_turns, &mut policy)?;
    log::info!("input closed after {turns} turns");
    Ok(())
}

/// What was decided for one turn, plus what the engine expects to happen.
#[derive(Debug, Clone)]
pub(super) struct TurnDecision {
    pub(super) command: Command,
    /// The turn's pack, rotated as the command asks.
    pub(super) pack: Pack,
    /// `None` for spells and for drops the engine rejects.
    pub(super) outcome: Option<DropOutcome>,
}

/// Runs the decision path for a normalized turn.
pub(super) fn decide_turn<P>(
    policy: &mut P,
    schedule: &PackSchedule,
    turn: &TurnState,
) -> anyhow::Result<TurnDecision>
where
    P: PlacementPolicy + ?Sized,
{
    let index = turn.turn();
    let pack = schedule.get(index).with_context(|| {
        format!(
            "turn {index} is past the end of the pack schedule ({} packs)",
            schedule.len()
        )
    })?;

    let command = policy.decide(turn, pack);
    let (pack, outcome) = match command {
        Command::Drop { column, rotation } => {
            let rotated = pack.rotated(rotation.quarter_turns());
            let outcome = match simulate_drop(turn.player().board(), &rotated, column) {
                Ok(outcome) => Some(outcome),
                Err(err) => {
                    log::warn!("turn {index}: command `{command}` cannot be simulated: {err}");
                    None
                }
            };
            (rotated, outcome)
        }
        Command::Spell => (*pack, None),
    };

    Ok(TurnDecision {
        command,
        pack,
        outcome,
    })
}

/// Plays a whole game over the given streams and returns the number of turns played.
pub(super) fn play<R, W, P>(
    input: R,
    output: &mut W,
    name: &str,
    max_turns: usize,
    policy: &mut P,
) -> anyhow::Result<usize>
where
    R: BufRead,
    W: Write,
    P: PlacementPolicy + ?Sized,
{
    writeln!(output, "{name}").context("Failed to announce the AI name")?;
    output.flush().context("Failed to flush the AI name")?;

    let mut reader = TokenReader::new(input);
    let schedule = protocol::read_pack_schedule(&mut reader, max_turns)
        .context("Failed to read the pack schedule")?;
    log::info!("pack schedule loaded ({} packs)", schedule.len());

    let mut turns = 0;
    while let Some(turn) = protocol::read_turn(&mut reader, BoardGeometry::STANDARD)
        .with_context(|| format!("Failed to read turn input after {turns} turns"))?
    {
        let turn = turn.normalized();
        let decision = decide_turn(policy, &schedule, &turn)?;

        log::trace!("turn {} pack:\n{}", turn.turn(), decision.pack);
        log::trace!("turn {} board:\n{}", turn.turn(), turn.player().board());
        match &decision.outcome {
            Some(outcome) => log::debug!(
                "turn {}: `{}` -> {} chains, score {}, {} obstacles sent{}",
                turn.turn(),
                decision.command,
                outcome.chain_count,
                outcome.score,
                outcome.obstacle_count,
                if outcome.is_game_over() {
                    ", game over"
                } else {
                    ""
                }
            ),
            None => log::debug!("turn {}: `{}`", turn.turn(), decision.command),
        }

        protocol::write_command(output, decision.command)
            .with_context(|| format!("Failed to write the command for turn {}", turn.turn()))?;
        turns += 1;
    }
    Ok(turns)
}
