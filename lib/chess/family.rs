use crate::chess::{between, Candidate, Color, File, Pattern, Piece, Position, Promotion};
use crate::chess::{Rank, Role, Square};
use crate::util::Coincide;
use derive_more::{Display, Error};

/// The reason why a [`Candidate`] was rejected.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Rejection {
    #[display(fmt = "incompatible piece")]
    IncompatiblePiece,
    #[display(fmt = "geometrically impossible")]
    GeometricallyImpossible,
    #[display(fmt = "path obstructed")]
    PathObstructed,
    #[display(fmt = "missing precondition")]
    MissingPrecondition,
}

/// The classification of a move, which determines how it is validated and played.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Family {
    #[display(fmt = "regular move")]
    Regular,
    #[display(fmt = "pawn move")]
    Pawn,
    #[display(fmt = "king-side castle")]
    KingSideCastle,
    #[display(fmt = "queen-side castle")]
    QueenSideCastle,
    #[display(fmt = "en passant")]
    EnPassant,
    /// Matches no piece and rejects every candidate.
    #[display(fmt = "empty move")]
    Empty,
}

/// What playing a validated move entails beyond moving the piece.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Plan {
    /// The piece moves, capturing whatever stands on the target square.
    Displace,
    /// A pawn advances two ranks, opening the en passant window.
    DoubleStep,
    /// A pawn reaches the last rank and is replaced.
    Promote(Role),
    /// The rook on `rook` jumps to `landing` next to the king.
    Castle { rook: Square, landing: Square },
    /// The pawn on `captured` is removed.
    EnPassant { captured: Square },
}

/// A [`Candidate`] accepted by the validator of its [`Family`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Validated {
    candidate: Candidate,
    family: Family,
    plan: Plan,
}

impl Validated {
    /// The move validated.
    #[inline(always)]
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// The family the move belongs to.
    #[inline(always)]
    pub fn family(&self) -> Family {
        self.family
    }

    /// How the move is played.
    #[inline(always)]
    pub fn plan(&self) -> Plan {
        self.plan
    }
}

impl Family {
    /// Picks the family of a candidate from the shape of the move.
    pub fn classify(candidate: &Candidate) -> Self {
        let d = candidate.delta();
        match candidate.piece().map(|p| p.role()) {
            None => Family::Empty,
            Some(Role::King) if d.ranks == 0 && d.files == 2 => Family::KingSideCastle,
            Some(Role::King) if d.ranks == 0 && d.files == -2 => Family::QueenSideCastle,
            Some(Role::Pawn) if d.files != 0 && candidate.target().is_none() => Family::EnPassant,
            Some(Role::Pawn) => Family::Pawn,
            Some(_) => Family::Regular,
        }
    }

    /// Runs the validation pipeline, stopping at the first check that fails.
    ///
    /// Checks are, in order: piece compatibility, geometric possibility,
    /// path obstruction and the preconditions specific to this family.
    pub fn validate(
        self,
        pos: &Position,
        candidate: Candidate,
        promotion: Promotion,
    ) -> Result<Validated, Rejection> {
        let piece = self.compatible(pos, &candidate)?;
        self.possible(piece, &candidate)?;
        self.unobstructed(pos, piece, &candidate)?;
        let plan = self.precondition(pos, piece, &candidate, promotion)?;

        Ok(Validated {
            candidate,
            family: self,
            plan,
        })
    }

    /// The rook that takes part in castling, if this family is a castle.
    fn rook(&self, side: Color) -> Option<Square> {
        let rank = Rank::First.perspective(side);
        match self {
            Family::KingSideCastle => Some(Square::new(File::H, rank)),
            Family::QueenSideCastle => Some(Square::new(File::A, rank)),
            _ => None,
        }
    }

    fn compatible(&self, pos: &Position, candidate: &Candidate) -> Result<Piece, Rejection> {
        let piece = match candidate.piece() {
            Some(p) if p.color() == pos.turn() => p,
            _ => return Err(Rejection::IncompatiblePiece),
        };

        if let Some(t) = candidate.target() {
            if t.color() == piece.color() || t.role() == Role::King {
                return Err(Rejection::IncompatiblePiece);
            }
        }

        let rook = Some(Piece::new(Role::Rook, piece.color()));
        let compatible = match self {
            Family::Regular => piece.role() != Role::Pawn,
            Family::Pawn | Family::EnPassant => piece.role() == Role::Pawn,
            Family::KingSideCastle | Family::QueenSideCastle => {
                piece.role() == Role::King && pos.piece_at(self.rook(piece.color())).coincides(&rook)
            }
            Family::Empty => false,
        };

        if compatible {
            Ok(piece)
        } else {
            Err(Rejection::IncompatiblePiece)
        }
    }

    fn possible(&self, piece: Piece, candidate: &Candidate) -> Result<(), Rejection> {
        let d = candidate.delta();
        let possible = match self {
            Family::Regular => Pattern::of(piece).reaches(d),
            Family::Pawn => {
                Pattern::of(piece).reaches(d) || (d.files == 0 && d.ranks == 2 * piece.color().forward())
            }
            Family::KingSideCastle | Family::QueenSideCastle => {
                let home = Square::new(File::E, Rank::First).perspective(piece.color());
                candidate.whence() == home && d.ranks == 0 && d.files.abs() == 2
            }
            Family::EnPassant => Pattern::attack(piece).reaches(d),
            Family::Empty => false,
        };

        if possible {
            Ok(())
        } else {
            Err(Rejection::GeometricallyImpossible)
        }
    }

    fn unobstructed(&self, pos: &Position, piece: Piece, candidate: &Candidate) -> Result<(), Rejection> {
        let is_empty = |s: &Square| pos[*s].is_none();

        let unobstructed = match self {
            Family::Regular if Pattern::of(piece).is_slider() => {
                between(candidate.whence(), candidate.whither()).iter().all(is_empty)
            }

            Family::Pawn => between(candidate.whence(), candidate.whither()).iter().all(is_empty),

            Family::KingSideCastle | Family::QueenSideCastle => match self.rook(piece.color()) {
                None => false,
                Some(rook) => {
                    let whence = candidate.whence();
                    let path = between(whence, candidate.whither());
                    let threat = !piece.color();

                    between(whence, rook).iter().all(is_empty)
                        && !path.iter().any(|&s| pos.is_attacked(s, threat))
                        && !pos.is_attacked(candidate.whither(), threat)
                }
            },

            Family::Regular | Family::EnPassant | Family::Empty => true,
        };

        if unobstructed {
            Ok(())
        } else {
            Err(Rejection::PathObstructed)
        }
    }

    fn precondition(
        &self,
        pos: &Position,
        piece: Piece,
        candidate: &Candidate,
        promotion: Promotion,
    ) -> Result<Plan, Rejection> {
        let side = piece.color();
        let (whence, whither) = (candidate.whence(), candidate.whither());
        let d = candidate.delta();

        match self {
            Family::Regular => Ok(Plan::Displace),

            Family::Pawn => {
                let plan = if whither.rank == Rank::Eighth.perspective(side) {
                    Plan::Promote(promotion.into())
                } else if d.ranks.abs() == 2 {
                    Plan::DoubleStep
                } else {
                    Plan::Displace
                };

                let fulfilled = match (d.files, candidate.target()) {
                    (0, None) => d.ranks.abs() != 2 || whence.rank == Rank::Second.perspective(side),
                    (0, Some(_)) => false,
                    (_, target) => target.is_some(),
                };

                if fulfilled {
                    Ok(plan)
                } else {
                    Err(Rejection::MissingPrecondition)
                }
            }

            Family::KingSideCastle | Family::QueenSideCastle => {
                let rook = self.rook(side).ok_or(Rejection::IncompatiblePiece)?;
                let landing = whence.shift(d.files.signum(), 0).ok_or(Rejection::GeometricallyImpossible)?;

                if !pos.is_castling_available(side, rook.file) {
                    return Err(Rejection::MissingPrecondition);
                }

                if pos.is_attacked(whence, !side) {
                    Err(Rejection::MissingPrecondition)
                } else {
                    Ok(Plan::Castle { rook, landing })
                }
            }

            Family::EnPassant => {
                let captured = Square::new(whither.file, whence.rank);
                let pawn = Some(Piece::new(Role::Pawn, !side));

                if whence.rank == Rank::Fifth.perspective(side)
                    && pos.en_passant_file().coincides(&Some(whither.file))
                    && pos[captured].coincides(&pawn)
                {
                    Ok(Plan::EnPassant { captured })
                } else {
                    Err(Rejection::MissingPrecondition)
                }
            }

            Family::Empty => Err(Rejection::MissingPrecondition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn check(pos: &Position, whence: &str, whither: &str) -> Result<Validated, Rejection> {
        let c = Candidate::new(pos, sq(whence), sq(whither));
        Family::classify(&c).validate(pos, c, Promotion::default())
    }

    fn setup(pieces: &[(&str, char)]) -> Position {
        let mut pos = Position::empty();
        for &(s, p) in pieces {
            pos.set_piece(sq(s), Some(Piece::try_from(p).unwrap()));
        }
        pos
    }

    #[proptest]
    fn empty_family_rejects_everything(pos: Position, a: Square, b: Square, p: Promotion) {
        let c = Candidate::new(&pos, a, b);
        assert_eq!(
            Family::Empty.validate(&pos, c, p),
            Err(Rejection::IncompatiblePiece)
        );
    }

    #[proptest]
    fn empty_squares_are_classified_as_empty(
        pos: Position,
        #[filter(#pos[#a].is_none())] a: Square,
        b: Square,
    ) {
        assert_eq!(Family::classify(&Candidate::new(&pos, a, b)), Family::Empty);
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let v = check(&Position::default(), "g1", "f3").unwrap();
        assert_eq!(v.family(), Family::Regular);
        assert_eq!(v.plan(), Plan::Displace);
    }

    #[test]
    fn pieces_of_the_side_not_to_move_are_incompatible() {
        assert_eq!(check(&Position::default(), "g8", "f6"), Err(Rejection::IncompatiblePiece));
    }

    #[test]
    fn friendly_pieces_cannot_be_captured() {
        assert_eq!(check(&Position::default(), "a1", "a2"), Err(Rejection::IncompatiblePiece));
    }

    #[test]
    fn kings_cannot_be_captured() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("e4", 'R')]);
        assert_eq!(check(&pos, "e4", "e8"), Err(Rejection::IncompatiblePiece));
    }

    #[test]
    fn bishop_cannot_move_orthogonally() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("c4", 'B')]);
        assert_eq!(check(&pos, "c4", "c6"), Err(Rejection::GeometricallyImpossible));
    }

    #[test]
    fn sliders_are_obstructed_by_pieces_in_between() {
        assert_eq!(check(&Position::default(), "f1", "c4"), Err(Rejection::PathObstructed));
    }

    #[test]
    fn pawn_steps_forward_once_or_twice_from_home() {
        let pos = Position::default();
        assert_eq!(check(&pos, "e2", "e3").map(|v| v.plan()), Ok(Plan::Displace));
        assert_eq!(check(&pos, "e2", "e4").map(|v| v.plan()), Ok(Plan::DoubleStep));
        assert_eq!(check(&pos, "e2", "e5"), Err(Rejection::GeometricallyImpossible));
    }

    #[test]
    fn pawn_cannot_move_backwards() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("d4", 'P')]);
        assert_eq!(check(&pos, "d4", "d3"), Err(Rejection::GeometricallyImpossible));
    }

    #[test]
    fn pawn_double_step_is_obstructed_by_the_square_in_between() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("d2", 'P'), ("d3", 'n')]);
        assert_eq!(check(&pos, "d2", "d4"), Err(Rejection::PathObstructed));
    }

    #[test]
    fn pawn_double_step_requires_the_home_rank() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("d3", 'P')]);
        assert_eq!(check(&pos, "d3", "d5"), Err(Rejection::MissingPrecondition));
    }

    #[test]
    fn pawn_cannot_double_step_onto_the_last_rank() {
        let pos = setup(&[("e1", 'K'), ("h8", 'k'), ("a6", 'P')]);
        assert_eq!(check(&pos, "a6", "a8"), Err(Rejection::MissingPrecondition));
        assert_eq!(check(&pos, "a6", "a7").map(|v| v.plan()), Ok(Plan::Displace));

        let mut pos = setup(&[("e1", 'K'), ("h8", 'k'), ("a3", 'p')]);
        pos.set_turn(Color::Black);
        assert_eq!(check(&pos, "a3", "a1"), Err(Rejection::MissingPrecondition));
    }

    #[test]
    fn pawn_cannot_capture_forward() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("d4", 'P'), ("d5", 'p')]);
        assert_eq!(check(&pos, "d4", "d5"), Err(Rejection::MissingPrecondition));
    }

    #[test]
    fn pawn_captures_diagonally() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("d4", 'P'), ("e5", 'p')]);
        let v = check(&pos, "d4", "e5").unwrap();
        assert_eq!((v.family(), v.plan()), (Family::Pawn, Plan::Displace));
    }

    #[test]
    fn pawn_moving_diagonally_onto_empty_square_requires_en_passant() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("d5", 'P'), ("e5", 'p')]);
        assert_eq!(check(&pos, "d5", "e6"), Err(Rejection::MissingPrecondition));
    }

    #[test]
    fn pawn_captures_en_passant_the_pawn_beside_it() {
        let mut pos = setup(&[("e1", 'K'), ("e8", 'k'), ("d5", 'P'), ("e5", 'p')]);
        pos.set_en_passant_file(Some(File::E));

        let v = check(&pos, "d5", "e6").unwrap();
        assert_eq!(v.family(), Family::EnPassant);
        assert_eq!(v.plan(), Plan::EnPassant { captured: sq("e5") });
    }

    #[test]
    fn pawn_reaching_the_last_rank_is_promoted() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("a7", 'P'), ("b8", 'r')]);
        assert_eq!(check(&pos, "a7", "a8").map(|v| v.plan()), Ok(Plan::Promote(Role::Queen)));
        assert_eq!(check(&pos, "a7", "b8").map(|v| v.plan()), Ok(Plan::Promote(Role::Queen)));

        let c = Candidate::new(&pos, sq("a7"), sq("a8"));
        let v = Family::Pawn.validate(&pos, c, Promotion::Knight).unwrap();
        assert_eq!(v.plan(), Plan::Promote(Role::Knight));
    }

    #[test]
    fn castling_requires_the_rook() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("a1", 'R')]);
        assert_eq!(check(&pos, "e1", "g1"), Err(Rejection::IncompatiblePiece));
        assert!(check(&pos, "e1", "c1").is_ok());
    }

    #[test]
    fn castling_requires_the_king_on_its_home_square() {
        let pos = setup(&[("d1", 'K'), ("e8", 'k'), ("h1", 'R')]);
        assert_eq!(check(&pos, "d1", "f1"), Err(Rejection::GeometricallyImpossible));
    }

    #[test]
    fn castling_is_obstructed_by_pieces_between_king_and_rook() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("a1", 'R'), ("b1", 'N')]);
        assert_eq!(check(&pos, "e1", "c1"), Err(Rejection::PathObstructed));
    }

    #[test]
    fn castling_is_obstructed_by_attacked_squares() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("h1", 'R'), ("f8", 'r')]);
        assert_eq!(check(&pos, "e1", "g1"), Err(Rejection::PathObstructed));

        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("h1", 'R'), ("g8", 'r')]);
        assert_eq!(check(&pos, "e1", "g1"), Err(Rejection::PathObstructed));
    }

    #[test]
    fn castling_queen_side_ignores_attacks_on_the_knight_square() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("a1", 'R'), ("b8", 'r')]);
        let v = check(&pos, "e1", "c1").unwrap();
        assert_eq!(
            v.plan(),
            Plan::Castle {
                rook: sq("a1"),
                landing: sq("d1")
            }
        );
    }

    #[test]
    fn castling_out_of_check_is_forbidden() {
        let pos = setup(&[("e1", 'K'), ("e8", 'k'), ("h1", 'R'), ("e5", 'r')]);
        assert_eq!(check(&pos, "e1", "g1"), Err(Rejection::MissingPrecondition));
    }

    #[test]
    fn castling_requires_the_rights() {
        let mut pos = setup(&[("e1", 'K'), ("e8", 'k'), ("h1", 'R'), ("a1", 'R')]);
        pos.forfeit_castling_with(Color::White, File::H);
        assert_eq!(check(&pos, "e1", "g1"), Err(Rejection::MissingPrecondition));
        assert!(check(&pos, "e1", "c1").is_ok());

        pos.forfeit_castling(Color::White);
        assert_eq!(check(&pos, "e1", "c1"), Err(Rejection::MissingPrecondition));
    }
}
