use crate::chess::{Color, File, Rank, Square};
use bitflags::bitflags;

bitflags! {
    /// Castling rights forfeited by either side.
    ///
    /// Rights are only ever forfeited, never restored.
    #[derive(Default)]
    pub struct Forfeits: u8 {
        const WHITE_KING =      0b00000001;
        const WHITE_KINGSIDE =  0b00000010;
        const WHITE_QUEENSIDE = 0b00000100;
        const BLACK_KING =      0b00001000;
        const BLACK_KINGSIDE =  0b00010000;
        const BLACK_QUEENSIDE = 0b00100000;
    }
}

impl Forfeits {
    /// The forfeiture of both castling rights of a side, caused by its king moving.
    #[inline(always)]
    pub fn king(side: Color) -> Self {
        match side {
            Color::White => Forfeits::WHITE_KING,
            Color::Black => Forfeits::BLACK_KING,
        }
    }

    /// The forfeiture of castling with the rook that starts on the given file.
    ///
    /// Only rooks on the a-file and h-file can ever castle, for any other file this is empty.
    #[inline(always)]
    pub fn rook(side: Color, file: File) -> Self {
        match (side, file) {
            (Color::White, File::H) => Forfeits::WHITE_KINGSIDE,
            (Color::White, File::A) => Forfeits::WHITE_QUEENSIDE,
            (Color::Black, File::H) => Forfeits::BLACK_KINGSIDE,
            (Color::Black, File::A) => Forfeits::BLACK_QUEENSIDE,
            _ => Forfeits::empty(),
        }
    }

    /// The forfeitures caused by any piece leaving or landing on this square.
    pub fn touching(sq: Square) -> Self {
        Color::iter()
            .filter(|&side| sq.rank == Rank::First.perspective(side))
            .map(|side| match sq.file {
                File::E => Forfeits::king(side),
                f => Forfeits::rook(side, f),
            })
            .fold(Forfeits::empty(), |a, b| a | b)
    }
}
