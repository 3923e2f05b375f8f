use crate::chess::{Changes, Forfeits, InconsistentState, Piece, Plan, Position, Validated};
use tracing::trace;

impl Validated {
    /// Plays this move, returning the changes made in the order they were applied.
    ///
    /// Nothing is written unless every piece involved is found where the move expects it.
    pub fn play(&self, pos: &mut Position) -> Result<Changes, InconsistentState> {
        let candidate = self.candidate();
        let (whence, whither) = (candidate.whence(), candidate.whither());
        let piece = pos[whence].ok_or(InconsistentState::MissingPiece(whence))?;
        let side = piece.color();

        let rook = match self.plan() {
            Plan::Castle { rook, .. } => {
                pos.king(side)?;
                Some(pos[rook].ok_or(InconsistentState::MissingPiece(rook))?)
            }
            _ => None,
        };

        let mut changes = Changes::default();
        changes.push(pos.set_piece(whence, None));

        match self.plan() {
            Plan::Displace | Plan::DoubleStep => {
                changes.push(pos.set_piece(whither, Some(piece)));
            }

            Plan::Promote(role) => {
                changes.push(pos.set_piece(whither, Some(Piece::new(role, side))));
            }

            Plan::Castle { rook: corner, landing } => {
                changes.push(pos.set_piece(whither, Some(piece)));
                changes.push(pos.set_piece(corner, None));
                changes.push(pos.set_piece(landing, rook));
                pos.forfeit_castling(side);
            }

            Plan::EnPassant { captured } => {
                changes.push(pos.set_piece(whither, Some(piece)));
                changes.push(pos.set_piece(captured, None));
            }
        }

        pos.forfeit(Forfeits::touching(whence) | Forfeits::touching(whither));

        pos.set_en_passant_file(match self.plan() {
            Plan::DoubleStep => Some(whence.file),
            _ => None,
        });

        pos.set_turn(!side);

        for change in &changes {
            trace!(%change, "applied");
        }

        Ok(changes)
    }
}
