use crate::chess::{Candidate, Family, InconsistentState, Position, Promotion, Rejection, Square, Validated};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// The outcome of attempting a move.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum MoveResult {
    /// The move was played, mutating these squares in order.
    Applied(Vec<Square>),
    /// The move is illegal and the position was left untouched.
    Rejected(Rejection),
}

impl MoveResult {
    /// Whether the move was played.
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveResult::Applied(_))
    }
}

/// Validates moving the piece on `whence` to `whither` without playing it.
///
/// Pawns reaching the last rank are promoted to `promotion`.
pub fn validate(
    pos: &Position,
    whence: Square,
    whither: Square,
    promotion: Promotion,
) -> Result<Validated, Rejection> {
    let candidate = Candidate::new(pos, whence, whither);
    Family::classify(&candidate).validate(pos, candidate, promotion)
}

/// Attempts to move the piece on `whence` to `whither`, promoting pawns to queens.
///
/// The position is mutated only if the move is applied.
pub fn attempt_move(
    pos: &mut Position,
    whence: Square,
    whither: Square,
) -> Result<MoveResult, InconsistentState> {
    attempt_move_promoting(pos, whence, whither, Promotion::default())
}

/// Attempts to move the piece on `whence` to `whither`, promoting pawns to `promotion`.
#[instrument(level = "debug", skip(pos), err)]
pub fn attempt_move_promoting(
    pos: &mut Position,
    whence: Square,
    whither: Square,
    promotion: Promotion,
) -> Result<MoveResult, InconsistentState> {
    match validate(pos, whence, whither, promotion) {
        Err(reason) => {
            debug!(%reason, "rejected");
            Ok(MoveResult::Rejected(reason))
        }

        Ok(v) => {
            let changes = v.play(pos)?;
            Ok(MoveResult::Applied(changes.squares().collect()))
        }
    }
}

/// The squares the piece on `whence` may move to.
///
/// A square belongs to this set if and only if [`attempt_move`] from `whence` to it succeeds.
pub fn legal_targets(pos: &Position, whence: Square) -> BTreeSet<Square> {
    Square::iter()
        .filter(|&whither| validate(pos, whence, whither, Promotion::default()).is_ok())
        .collect()
}

/// Every move available to the side to move, as pairs of source and target squares.
pub fn legal_moves(pos: &Position) -> impl Iterator<Item = (Square, Square)> + '_ {
    pos.pieces()
        .filter(move |&(_, p)| p.color() == pos.turn())
        .flat_map(move |(whence, _)| legal_targets(pos, whence).into_iter().map(move |t| (whence, t)))
}
