use crate::chess::{Delta, Piece, Position, Square};
use derive_more::Display;

/// A proposed move, with the occupants of both squares read at the moment it is proposed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[display(fmt = "{}{}", whence, whither)]
pub struct Candidate {
    whence: Square,
    piece: Option<Piece>,
    whither: Square,
    target: Option<Piece>,
}

impl Candidate {
    /// Proposes moving whatever stands on `whence` to `whither`.
    pub fn new(pos: &Position, whence: Square, whither: Square) -> Self {
        Candidate {
            whence,
            piece: pos[whence],
            whither,
            target: pos[whither],
        }
    }

    /// The source square.
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The piece on the source square.
    #[inline(always)]
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// The target square.
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// The piece on the target square.
    #[inline(always)]
    pub fn target(&self) -> Option<Piece> {
        self.target
    }

    /// The displacement from the source to the target square.
    #[inline(always)]
    pub fn delta(&self) -> Delta {
        self.whither - self.whence
    }
}
