use crate::io::Io;
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use derive_more::{Display, Error, From};
use lib::chess::{Game, MoveResult, ParsePromotionError, ParseSquareError, Position, Promotion};
use lib::chess::{Setup, Square};
use lib::util::Build;
use std::io::{stdin, stdout};
use std::str::FromStr;
use tracing::{info, instrument, warn};

/// Plays a game of chess read from the standard input.
///
/// Each line is either a move such as `e2 e4` or `a7 a8 n`,
/// `targets e2` to list where a piece may go, `undo` or `show`.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {}

/// A line of input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    Move(Square, Square, Option<Promotion>),
    Targets(Square),
    Undo,
    Show,
}

/// The reason why parsing [`Command`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
enum ParseCommandError {
    #[display(fmt = "{}", _0)]
    InvalidSquare(ParseSquareError),

    #[display(fmt = "{}", _0)]
    InvalidPromotion(ParsePromotionError),

    #[display(fmt = "unrecognized command `{}`", _0)]
    #[from(ignore)]
    Unrecognized(#[error(not(source))] String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_whitespace().collect::<Vec<_>>()[..] {
            ["undo"] => Ok(Command::Undo),
            ["show"] => Ok(Command::Show),
            ["targets", whence] => Ok(Command::Targets(whence.parse()?)),
            [whence, whither] => Ok(Command::Move(whence.parse()?, whither.parse()?, None)),
            [whence, whither, promotion] => Ok(Command::Move(
                whence.parse()?,
                whither.parse()?,
                Some(promotion.parse()?),
            )),
            _ => Err(ParseCommandError::Unrecognized(s.trim().into())),
        }
    }
}

fn board(pos: &Position) -> String {
    format!("{}\n{} to move", pos, pos.turn())
}

impl Play {
    #[instrument(level = "trace", skip(self, setup), err)]
    pub fn execute(self, setup: Setup) -> Result<(), Anyhow> {
        let mut game = Game::new(setup.build().context("invalid setup")?);
        let mut io = Io::new(stdout(), stdin().lock());

        io.send(board(game.position()))?;
        io.flush()?;

        while let Some(line) = io.recv()? {
            match line.parse() {
                Err(e) => {
                    warn!(%e);
                    io.send(format_args!("error: {}", e))?;
                }

                Ok(Command::Move(whence, whither, promotion)) => {
                    let promotion = promotion.unwrap_or_default();
                    match game.play_promoting(whence, whither, promotion)? {
                        MoveResult::Applied(squares) => {
                            info!(%whence, %whither, changes = squares.len());
                            io.send(board(game.position()))?;
                        }

                        MoveResult::Rejected(reason) => {
                            io.send(format_args!("illegal move {}{}: {}", whence, whither, reason))?;
                        }
                    }
                }

                Ok(Command::Targets(whence)) => {
                    let targets: Vec<_> = game.legal_targets(whence).iter().map(Square::to_string).collect();
                    io.send(targets.join(" "))?;
                }

                Ok(Command::Undo) => match game.undo() {
                    Some(_) => io.send(board(game.position()))?,
                    None => io.send("nothing to undo")?,
                },

                Ok(Command::Show) => io.send(board(game.position()))?,
            }

            io.flush()?;
        }

        Ok(())
    }
}
