use crate::chess::{between, Color, File, Forfeits, Pattern, Piece, Rank, Role, Square, StateChange};
use derive_more::{DebugCustom, Display, Error};
use std::fmt::{self, Write};
use std::ops::Index;

#[cfg(test)]
use proptest::sample::{Selector, SelectorStrategy};

#[cfg(test)]
use proptest::{prelude::*, strategy::Map};

#[cfg(test)]
use std::ops::Range;

/// An invariant of [`Position`] that does not hold.
///
/// This is never the consequence of an illegal move, but of a position that was tampered with.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum InconsistentState {
    #[display(fmt = "the {} king is missing", _0)]
    MissingKing(#[error(not(source))] Color),

    #[display(fmt = "there is more than one {} king", _0)]
    ExtraKing(#[error(not(source))] Color),

    #[display(fmt = "expected a piece on square `{}`", _0)]
    MissingPiece(#[error(not(source))] Square),
}

/// The state of the chess board.
///
/// Besides the pieces on every square, it tracks the side to move,
/// which castling rights have been forfeited and the file of the pawn
/// that may be captured en passant.
#[derive(DebugCustom, Clone, Eq, PartialEq, Hash)]
#[debug(
    fmt = "Position({} to move, forfeited {:?}, en passant {:?})\n{}",
    turn,
    forfeits,
    en_passant,
    self
)]
pub struct Position {
    board: [Option<Piece>; 64],
    turn: Color,
    forfeits: Forfeits,
    en_passant: Option<File>,
}

impl Default for Position {
    fn default() -> Self {
        Position::standard_setup()
    }
}

impl Position {
    /// A board without any pieces, White to move.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            turn: Color::White,
            forfeits: Forfeits::empty(),
            en_passant: None,
        }
    }

    /// The initial arrangement of a game of chess.
    pub fn standard_setup() -> Self {
        use Role::*;

        let mut pos = Position::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for c in Color::iter() {
            for (&f, &r) in File::ALL.iter().zip(&back) {
                pos.put(Square::new(f, Rank::First.perspective(c)), Some(Piece::new(r, c)));
                pos.put(Square::new(f, Rank::Second.perspective(c)), Some(Piece::new(Pawn, c)));
            }
        }

        pos
    }

    /// The piece on a square, or `None` if the square is empty or `None` itself.
    #[inline(always)]
    pub fn piece_at(&self, sq: impl Into<Option<Square>>) -> Option<Piece> {
        self.board[sq.into()?.index()]
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The castling rights forfeited so far.
    #[inline(always)]
    pub fn forfeits(&self) -> Forfeits {
        self.forfeits
    }

    /// The file of the pawn that double stepped on the previous move, if any.
    #[inline(always)]
    pub fn en_passant_file(&self) -> Option<File> {
        self.en_passant
    }

    /// Returns an iterator over the occupied squares and their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |sq| Some((sq, self[sq]?)))
    }

    /// Places a piece on a square, or clears it if `piece` is `None`.
    ///
    /// Returns the change made, which is neutral if `sq` is `None`.
    pub fn set_piece(&mut self, sq: impl Into<Option<Square>>, piece: Option<Piece>) -> StateChange {
        match sq.into() {
            None => StateChange::neutral(),
            Some(sq) => {
                let change = StateChange::new(Some(sq), self[sq], piece);
                change.apply(self);
                change
            }
        }
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, sq: Square, piece: Option<Piece>) {
        self.board[sq.index()] = piece;
    }

    #[inline(always)]
    pub(crate) fn set_turn(&mut self, side: Color) {
        self.turn = side;
    }

    /// Marks the file of a pawn that has just double stepped, or clears it.
    #[inline(always)]
    pub fn set_en_passant_file(&mut self, file: Option<File>) {
        self.en_passant = file;
    }

    /// Forfeits both castling rights of a side.
    pub fn forfeit_castling(&mut self, side: Color) {
        self.forfeits |= Forfeits::king(side);
    }

    /// Forfeits castling with the rook that starts on `file`.
    pub fn forfeit_castling_with(&mut self, side: Color, file: File) {
        self.forfeits |= Forfeits::rook(side, file);
    }

    pub(crate) fn forfeit(&mut self, forfeits: Forfeits) {
        self.forfeits |= forfeits;
    }

    /// Whether neither the king nor the rook that starts on `file` have given up castling.
    pub fn is_castling_available(&self, side: Color, file: File) -> bool {
        let rook = Forfeits::rook(side, file);
        !rook.is_empty() && !self.forfeits.intersects(Forfeits::king(side) | rook)
    }

    /// The square of the king of a side.
    pub fn king(&self, side: Color) -> Result<Square, InconsistentState> {
        let king = Piece::new(Role::King, side);
        let mut squares = self.pieces().filter(|&(_, p)| p == king).map(|(s, _)| s);

        match (squares.next(), squares.next()) {
            (Some(sq), None) => Ok(sq),
            (None, _) => Err(InconsistentState::MissingKing(side)),
            (Some(_), Some(_)) => Err(InconsistentState::ExtraKing(side)),
        }
    }

    /// Whether any piece of side `by` threatens the square.
    ///
    /// The square's own occupant is irrelevant.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.pieces()
            .filter(|&(_, p)| p.color() == by)
            .any(|(whence, p)| {
                let pattern = Pattern::attack(p);
                pattern.reaches(sq - whence)
                    && (!pattern.is_slider() || between(whence, sq).iter().all(|&s| self[s].is_none()))
            })
    }

    /// Whether the king of a side is attacked.
    pub fn is_check(&self, side: Color) -> Result<bool, InconsistentState> {
        Ok(self.is_attacked(self.king(side)?, !side))
    }
}

impl Index<Square> for Position {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.board[sq.index()]
    }
}

/// Draws the board with the eighth rank on top.
///
/// The alternate form `{:#}` draws figurines instead of letters.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in Rank::iter().rev() {
            write!(f, "{} ", r)?;
            for file in File::iter() {
                match self[Square::new(file, r)] {
                    None => f.write_char('.')?,
                    Some(p) if f.alternate() => write!(f, "{:#}", p)?,
                    Some(p) => write!(f, "{}", p)?,
                }

                f.write_char(if file == File::H { '\n' } else { ' ' })?;
            }
        }

        f.write_str(" ")?;
        for file in File::iter() {
            write!(f, " {}", file)?;
        }

        Ok(())
    }
}

#[cfg(test)]
impl Arbitrary for Position {
    type Parameters = ();
    type Strategy = Map<(Range<usize>, SelectorStrategy), fn((usize, Selector)) -> Position>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use crate::chess::{attempt_move, legal_moves};

        (0..128, any::<Selector>()).prop_map(|(moves, selector)| {
            let mut pos = Position::default();

            for _ in 0..moves {
                let candidates: Vec<_> = legal_moves(&pos).collect();
                match selector.try_select(candidates) {
                    None => break,
                    Some((whence, whither)) => match attempt_move(&mut pos, whence, whither) {
                        Ok(r) if r.is_applied() => {}
                        _ => break,
                    },
                }

                // A captured king ends the game.
                if pos.king(Color::White).is_err() || pos.king(Color::Black).is_err() {
                    break;
                }
            }

            pos
        })
    }
}
