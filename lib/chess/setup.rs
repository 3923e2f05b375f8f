use crate::chess::{Color, File, Forfeits, Piece, Position, Rank, Role, Square};
use crate::util::Build;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A castling right given up.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Forfeit {
    /// Both rights of a side.
    King(Color),
    /// Castling with the rook that starts on a file.
    Rook(Color, File),
}

/// Runtime description of a [`Position`].
///
/// Written in [RON], e.g. `(turn: Black, pieces: {"e1": 'K', "e8": 'k'}, forfeited: [King(White)])`.
/// Omitted fields take the value they have in the standard setup.
///
/// [RON]: https://github.com/ron-rs/ron
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Setup {
    /// The side to move.
    pub turn: Color,
    /// The occupied squares.
    pub pieces: BTreeMap<Square, Piece>,
    /// The castling rights given up.
    pub forfeited: Vec<Forfeit>,
    /// The file of the pawn that just double stepped.
    pub en_passant: Option<File>,
}

impl Default for Setup {
    fn default() -> Self {
        Setup::from(&Position::default())
    }
}

impl From<&Position> for Setup {
    fn from(pos: &Position) -> Self {
        let forfeits = pos.forfeits();
        let forfeited = Color::iter()
            .flat_map(|c| {
                let king = Some(Forfeit::King(c)).filter(|_| forfeits.contains(Forfeits::king(c)));
                let rooks = [File::A, File::H]
                    .into_iter()
                    .filter(move |&f| forfeits.contains(Forfeits::rook(c, f)))
                    .map(move |f| Forfeit::Rook(c, f));

                king.into_iter().chain(rooks)
            })
            .collect();

        Setup {
            turn: pos.turn(),
            pieces: pos.pieces().collect(),
            forfeited,
            en_passant: pos.en_passant_file(),
        }
    }
}

/// The reason why a [`Setup`] does not describe a valid [`Position`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum InvalidSetup {
    #[display(fmt = "the {} king is missing", _0)]
    MissingKing(#[error(not(source))] Color),

    #[display(fmt = "there is more than one {} king", _0)]
    TooManyKings(#[error(not(source))] Color),

    #[display(fmt = "pawn on back rank square `{}`", _0)]
    PawnOnBackRank(#[error(not(source))] Square),

    #[display(fmt = "no pawn can be captured en passant on file `{}`", _0)]
    InvalidEnPassant(#[error(not(source))] File),
}

impl Build for Setup {
    type Output = Position;
    type Error = InvalidSetup;

    fn build(self) -> Result<Self::Output, Self::Error> {
        for c in Color::iter() {
            let king = Piece::new(Role::King, c);
            match self.pieces.values().filter(|&&p| p == king).count() {
                0 => return Err(InvalidSetup::MissingKing(c)),
                1 => {}
                _ => return Err(InvalidSetup::TooManyKings(c)),
            }
        }

        if let Some((&sq, _)) = self.pieces.iter().find(|&(s, p)| {
            p.role() == Role::Pawn && [Rank::First, Rank::Eighth].contains(&s.rank)
        }) {
            return Err(InvalidSetup::PawnOnBackRank(sq));
        }

        if let Some(f) = self.en_passant {
            let mover = !self.turn;
            let sq = Square::new(f, Rank::Fourth.perspective(mover));
            if self.pieces.get(&sq) != Some(&Piece::new(Role::Pawn, mover)) {
                return Err(InvalidSetup::InvalidEnPassant(f));
            }
        }

        let mut pos = Position::empty();

        for (sq, p) in self.pieces {
            pos.set_piece(sq, Some(p));
        }

        for f in self.forfeited {
            match f {
                Forfeit::King(c) => pos.forfeit_castling(c),
                Forfeit::Rook(c, file) => pos.forfeit_castling_with(c, file),
            }
        }

        pos.set_turn(self.turn);
        pos.set_en_passant_file(self.en_passant);

        Ok(pos)
    }
}

/// The reason why parsing [`Setup`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse setup")]
pub struct ParseSetupError(ron::de::SpannedError);

impl FromStr for Setup {
    type Err = ParseSetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}
