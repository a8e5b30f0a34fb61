//! Line-oriented game protocol.
//!
//! Input is a stream of whitespace-separated tokens. Every grid (pack or
//! board) is followed by an `END` token:
//!
//! ```text
//! <pack schedule>   MAX_TURNS × (PACK_SIZE² integers, END)
//! <turn>*           turn index, player status, enemy status
//! <status>          remaining ms, obstacle count, skill point, score,
//!                   VISIBLE_HEIGHT × BOARD_WIDTH integers, END
//! ```
//!
//! Output is one line per turn, the [`Command`] wire format.

use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
    str::FromStr,
};

use sumfall_engine::{
    Board, BoardGeometry, Command, GridShapeError, PACK_SIZE, Pack, PackSchedule, PlayerStatus,
    TurnState,
};

const TERMINATOR: &str = "END";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub(crate) enum ProtocolError {
    #[display("failed to read game input")]
    Io(io::Error),
    #[display("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },
    #[display("invalid {expected}: {token:?}")]
    InvalidInteger {
        expected: &'static str,
        token: String,
    },
    #[display("expected `{TERMINATOR}` after {after}, got {found:?}")]
    MissingTerminator { after: &'static str, found: String },
    #[display("malformed {what}")]
    MalformedGrid {
        what: &'static str,
        source: GridShapeError,
    },
}

impl From<io::Error> for ProtocolError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Splits an input stream into whitespace-separated tokens, across lines.
#[derive(Debug)]
pub(crate) struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R> TokenReader<R>
where
    R: BufRead,
{
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, or `None` at the end of input.
    pub(crate) fn next_token(&mut self) -> Result<Option<String>, ProtocolError> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }

    fn expect_token(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        self.next_token()?
            .ok_or(ProtocolError::UnexpectedEof { expected })
    }

    fn read_int<T>(&mut self, expected: &'static str) -> Result<T, ProtocolError>
    where
        T: FromStr,
    {
        let token = self.expect_token(expected)?;
        token
            .parse()
            .map_err(|_| ProtocolError::InvalidInteger { expected, token })
    }

    fn expect_terminator(&mut self, after: &'static str) -> Result<(), ProtocolError> {
        let token = self.expect_token(TERMINATOR)?;
        if token != TERMINATOR {
            return Err(ProtocolError::MissingTerminator {
                after,
                found: token,
            });
        }
        Ok(())
    }

    fn read_grid(
        &mut self,
        height: usize,
        width: usize,
        what: &'static str,
    ) -> Result<Vec<Vec<u8>>, ProtocolError> {
        let mut rows = Vec::with_capacity(height);
        for _ in 0..height {
            let row = (0..width)
                .map(|_| self.read_int("block value"))
                .collect::<Result<Vec<u8>, _>>()?;
            rows.push(row);
        }
        self.expect_terminator(what)?;
        Ok(rows)
    }
}

pub(crate) fn read_pack<R>(reader: &mut TokenReader<R>) -> Result<Pack, ProtocolError>
where
    R: BufRead,
{
    let rows = reader.read_grid(PACK_SIZE, PACK_SIZE, "pack")?;
    Pack::from_rows(&rows).map_err(|source| ProtocolError::MalformedGrid {
        what: "pack",
        source,
    })
}

pub(crate) fn read_pack_schedule<R>(
    reader: &mut TokenReader<R>,
    max_turns: usize,
) -> Result<PackSchedule, ProtocolError>
where
    R: BufRead,
{
    (0..max_turns).map(|_| read_pack(reader)).collect()
}

pub(crate) fn read_player_status<R>(
    reader: &mut TokenReader<R>,
    geometry: BoardGeometry,
) -> Result<PlayerStatus, ProtocolError>
where
    R: BufRead,
{
    let remaining_time_ms = reader.read_int("remaining time")?;
    let obstacle_count = reader.read_int("obstacle count")?;
    let skill_point = reader.read_int("skill point")?;
    let score = reader.read_int("score")?;
    let rows = reader.read_grid(geometry.visible_height(), geometry.width(), "board")?;
    let board = Board::from_visible_rows(geometry, &rows).map_err(|source| {
        ProtocolError::MalformedGrid {
            what: "board",
            source,
        }
    })?;
    Ok(PlayerStatus::new(board)
        .with_remaining_time_ms(remaining_time_ms)
        .with_obstacle_count(obstacle_count)
        .with_skill_point(skill_point)
        .with_score(score))
}

/// Reads the next turn.
///
/// Returns `None` if the input ends cleanly before the turn index.
pub(crate) fn read_turn<R>(
    reader: &mut TokenReader<R>,
    geometry: BoardGeometry,
) -> Result<Option<TurnState>, ProtocolError>
where
    R: BufRead,
{
    let Some(token) = reader.next_token()? else {
        return Ok(None);
    };
    let turn = token.parse().map_err(|_| ProtocolError::InvalidInteger {
        expected: "turn index",
        token,
    })?;
    let player = read_player_status(reader, geometry)?;
    let enemy = read_player_status(reader, geometry)?;
    Ok(Some(TurnState::new(turn, player, enemy)))
}

pub(crate) fn write_command<W>(writer: &mut W, command: Command) -> io::Result<()>
where
    W: Write,
{
    writeln!(writer, "{command}")?;
    writer.flush()
}
