use std::{io::BufRead, path::PathBuf};

use anyhow::Context as _;
use serde::Serialize;
use sumfall_engine::{Board, BoardGeometry, Command, DropOutcome, Pack, RandomPolicy};

use crate::{
    protocol::{self, TokenReader},
    util::{self, Output},
};

use super::{PolicyArg, run::decide_turn};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DecideArg {
    /// Pack schedule file, in the same format the game sends at startup
    #[arg(long)]
    packs: PathBuf,
    /// File holding a single turn, in the same format the game sends each turn
    #[arg(long)]
    turn: PathBuf,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    #[clap(flatten)]
    policy: PolicyArg,
}

/// JSON report of a single decided turn.
#[derive(Debug, Clone, Serialize)]
struct Decision {
    turn: usize,
    command: Command,
    /// The line that would be sent to the game.
    wire: String,
    /// The pack after applying the command's rotation.
    pack: Pack,
    /// The player's board after pending obstacles fell.
    board: Board,
    outcome: Option<DropOutcome>,
}

pub(crate) fn run(arg: &DecideArg) -> anyhow::Result<()> {
    let DecideArg {
        packs,
        turn,
        output,
        policy,
    } = arg;

    let packs_reader = util::open_input_file("pack schedule", packs)?;
    let turn_reader = util::open_input_file("turn", turn)?;
    let decision = decide(packs_reader, turn_reader, policy).with_context(|| {
        format!(
            "Failed to decide the turn in {} with packs from {}",
            turn.display(),
            packs.display()
        )
    })?;
    log::info!("turn {}: `{}`", decision.turn, decision.wire);

    Output::save_json(&decision, output.clone())
}

fn decide<P, T>(packs: P, turn: T, policy: &PolicyArg) -> anyhow::Result<Decision>
where
    P: BufRead,
    T: BufRead,
{
    let schedule = protocol::read_pack_schedule(&mut TokenReader::new(packs), policy.max_turns)
        .context("Failed to read the pack schedule")?;
    let turn = protocol::read_turn(&mut TokenReader::new(turn), BoardGeometry::STANDARD)
        .context("Failed to read the turn")?
        .context("Turn input is empty")?
        .normalized();

    let mut random = RandomPolicy::with_seed(policy.seed);
    let decided = decide_turn(&mut random, &schedule, &turn)?;

    Ok(Decision {
        turn: turn.turn(),
        command: decided.command,
        wire: decided.command.to_string(),
        pack: decided.pack,
        board: turn.player().board().clone(),
        outcome: decided.outcome,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::protocol::tests::{schedule_text, status_text};

    use super::*;

    fn policy(max_turns: usize) -> PolicyArg {
        PolicyArg {
            seed: 99,
            max_turns,
        }
    }

    #[test]
    fn test_decision_report() {
        let turn = format!("1\n{}{}", status_text(10, 0), status_text(0, 0));
        let decision = decide(
            Cursor::new(schedule_text(2)),
            Cursor::new(turn),
            &policy(2),
        )
        .unwrap();

        assert_eq!(decision.turn, 1);
        assert_eq!(decision.wire, decision.command.to_string());
        // Ten pending obstacles fell onto the floor before deciding
        for x in 0..10 {
            assert_eq!(decision.board.get(18, x), sumfall_engine::Block::OBSTACLE);
        }
        assert!(decision.outcome.is_some());

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["turn"], 1);
        assert_eq!(json["wire"], decision.wire.as_str());
        assert_eq!(json["board"].as_array().unwrap().len(), 19);
        assert_eq!(json["board"][18][0], 11);
        assert_eq!(json["pack"].as_array().unwrap().len(), 2);
        assert!(json["outcome"]["chain_count"].is_u64());
        assert_eq!(
            json["outcome"]["obstacle_count"],
            decision.outcome.as_ref().unwrap().obstacle_count
        );
    }

    #[test]
    fn test_same_seed_same_report() {
        let turn = format!("0\n{}{}", status_text(0, 3), status_text(0, 0));
        let a = decide(
            Cursor::new(schedule_text(1)),
            Cursor::new(turn.clone()),
            &policy(1),
        )
        .unwrap();
        let b = decide(Cursor::new(schedule_text(1)), Cursor::new(turn), &policy(1)).unwrap();
        assert_eq!(a.command, b.command);
        assert_eq!(a.outcome, b.outcome);
    }

    #[test]
    fn test_empty_turn_file_is_an_error() {
        let result = decide(
            Cursor::new(schedule_text(1)),
            Cursor::new(String::new()),
            &policy(1),
        );
        assert!(result.is_err());
    }
}
