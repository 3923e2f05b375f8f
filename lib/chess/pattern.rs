use crate::chess::{Color, Delta, Piece, Role, Square};
use arrayvec::ArrayVec;

const KNIGHT: [Delta; 8] = [
    Delta::new(1, 2),
    Delta::new(2, 1),
    Delta::new(2, -1),
    Delta::new(1, -2),
    Delta::new(-1, -2),
    Delta::new(-2, -1),
    Delta::new(-2, 1),
    Delta::new(-1, 2),
];

const ORTHOGONAL: [Delta; 4] = [
    Delta::new(0, 1),
    Delta::new(1, 0),
    Delta::new(0, -1),
    Delta::new(-1, 0),
];

const DIAGONAL: [Delta; 4] = [
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, -1),
    Delta::new(-1, 1),
];

const ROYAL: [Delta; 8] = [
    Delta::new(0, 1),
    Delta::new(1, 0),
    Delta::new(0, -1),
    Delta::new(-1, 0),
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, -1),
    Delta::new(-1, 1),
];

const WHITE_PAWN: [Delta; 3] = [Delta::new(0, 1), Delta::new(-1, 1), Delta::new(1, 1)];
const BLACK_PAWN: [Delta; 3] = [Delta::new(0, -1), Delta::new(-1, -1), Delta::new(1, -1)];

/// How a [`Piece`] moves across an otherwise empty board.
///
/// A pattern answers whether a piece could ever reach a square, never whether it may do so now.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Pattern {
    /// Jumps by exactly one of the offsets.
    Leaper(&'static [Delta]),
    /// Slides any number of steps in one of the directions.
    Slider(&'static [Delta]),
}

impl Pattern {
    /// The movement pattern of a piece.
    ///
    /// Pawns step forward or diagonally forward, their double step is not part of the pattern.
    pub fn of(piece: Piece) -> Self {
        match (piece.role(), piece.color()) {
            (Role::Pawn, Color::White) => Pattern::Leaper(&WHITE_PAWN),
            (Role::Pawn, Color::Black) => Pattern::Leaper(&BLACK_PAWN),
            (Role::Knight, _) => Pattern::Leaper(&KNIGHT),
            (Role::Bishop, _) => Pattern::Slider(&DIAGONAL),
            (Role::Rook, _) => Pattern::Slider(&ORTHOGONAL),
            (Role::Queen, _) => Pattern::Slider(&ROYAL),
            (Role::King, _) => Pattern::Leaper(&ROYAL),
        }
    }

    /// The squares a piece threatens, which differs from [`Pattern::of`] only for pawns.
    pub fn attack(piece: Piece) -> Self {
        match (piece.role(), piece.color()) {
            (Role::Pawn, Color::White) => Pattern::Leaper(&WHITE_PAWN[1..]),
            (Role::Pawn, Color::Black) => Pattern::Leaper(&BLACK_PAWN[1..]),
            _ => Pattern::of(piece),
        }
    }

    /// Whether this pattern slides.
    #[inline(always)]
    pub fn is_slider(&self) -> bool {
        matches!(self, Pattern::Slider(_))
    }

    /// Whether a displacement belongs to this pattern.
    pub fn reaches(&self, d: Delta) -> bool {
        match *self {
            Pattern::Leaper(ds) => ds.contains(&d),
            Pattern::Slider(ds) => ds.contains(&d.signum()) && {
                let k = d.files.abs().max(d.ranks.abs());
                d.signum().times(k) == Some(d)
            },
        }
    }

    /// Every displacement in this pattern that fits on the board.
    pub fn offsets(&self) -> impl Iterator<Item = Delta> {
        let (ds, steps) = match *self {
            Pattern::Leaper(ds) => (ds, 1..2),
            Pattern::Slider(ds) => (ds, 1..8),
        };

        ds.iter()
            .flat_map(move |&d| steps.clone().filter_map(move |k| d.times(k)))
    }

    /// The squares reachable from `whence` on an empty board.
    pub fn targets(&self, whence: Square) -> impl Iterator<Item = Square> {
        self.offsets().filter_map(move |d| whence + d)
    }
}

/// The squares strictly between two squares on the same line, ordered away from `whence`.
///
/// Empty if the squares are adjacent or not on a common rank, file or diagonal.
pub fn between(whence: Square, whither: Square) -> ArrayVec<Square, 6> {
    let d = whither - whence;
    let step = d.signum();
    let n = d.files.abs().max(d.ranks.abs());

    if step.times(n) != Some(d) {
        return ArrayVec::new();
    }

    (1..n).filter_map(|k| whence + step.times(k)?).collect()
}
