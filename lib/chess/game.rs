use crate::chess::{validate, Changes, Color, File, InconsistentState, MoveResult, Position};
use crate::chess::{Promotion, Square};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// A move played in a [`Game`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Record {
    whence: Square,
    whither: Square,
    changes: Changes,
    turn: Color,
    en_passant: Option<File>,
}

impl Record {
    /// The source square of the move.
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The target square of the move.
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// The changes made by the move, in the order they were applied.
    pub fn changes(&self) -> &Changes {
        &self.changes
    }
}

/// A [`Position`] together with the moves that led to it.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Game {
    position: Position,
    history: Vec<Record>,
}

impl Game {
    /// Starts a game from a position.
    pub fn new(position: Position) -> Self {
        Game {
            position,
            history: Vec::new(),
        }
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The moves played so far, oldest first.
    pub fn history(&self) -> &[Record] {
        &self.history
    }

    /// The squares the piece on `whence` may move to.
    pub fn legal_targets(&self, whence: Square) -> BTreeSet<Square> {
        crate::chess::legal_targets(&self.position, whence)
    }

    /// Plays a move, promoting pawns to queens.
    pub fn play(&mut self, whence: Square, whither: Square) -> Result<MoveResult, InconsistentState> {
        self.play_promoting(whence, whither, Promotion::default())
    }

    /// Plays a move, promoting pawns to `promotion`.
    #[instrument(level = "debug", skip(self), err)]
    pub fn play_promoting(
        &mut self,
        whence: Square,
        whither: Square,
        promotion: Promotion,
    ) -> Result<MoveResult, InconsistentState> {
        let v = match validate(&self.position, whence, whither, promotion) {
            Ok(v) => v,
            Err(reason) => {
                debug!(%reason, "rejected");
                return Ok(MoveResult::Rejected(reason));
            }
        };

        let turn = self.position.turn();
        let en_passant = self.position.en_passant_file();
        let changes = v.play(&mut self.position)?;
        let squares = changes.squares().collect();

        self.history.push(Record {
            whence,
            whither,
            changes,
            turn,
            en_passant,
        });

        Ok(MoveResult::Applied(squares))
    }

    /// Takes back the last move, returning it or `None` if no move has been played.
    ///
    /// Castling rights forfeited by the move are not restored.
    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> Option<Record> {
        let record = self.history.pop()?;
        record.changes.reverse(&mut self.position);
        self.position.set_turn(record.turn);
        self.position.set_en_passant_file(record.en_passant);
        debug!(whence = %record.whence, whither = %record.whither, "undone");
        Some(record)
    }
}
