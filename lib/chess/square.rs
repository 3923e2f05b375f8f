use crate::chess::{Color, Delta, File, ParseFileError, ParseRankError, Point, Rank, Rect};
use derive_more::{DebugCustom, Display, Error, From};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::ops::{Add, Sub};
use std::str::FromStr;
use tracing::instrument;

/// A square on the chess board.
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "{}", self)]
#[display(fmt = "{}{}", file, rank)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square { file, rank }
    }

    /// Looks up the [`Square`] at the given coordinates, same as [`Square::new`].
    #[inline(always)]
    pub const fn at(file: File, rank: Rank) -> Self {
        Square::new(file, rank)
    }

    /// Constructs [`Square`] from its index, or `None` if `i` is not in the range (0..=63).
    #[inline(always)]
    pub fn from_index(i: usize) -> Option<Self> {
        Some(Square::new(*File::ALL.get(i % 8)?, *Rank::ALL.get(i / 8)?))
    }

    /// This square's index in the range (0..=63), counting files first from a1.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.rank.index() as usize * 8 + self.file.index() as usize
    }

    /// Returns an iterator over [`Square`]s ordered by [index][`Square::index`].
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..64).map(|i| Square::new(File::ALL[i % 8], Rank::ALL[i / 8]))
    }

    /// Shifts this square by a number of files and ranks.
    ///
    /// Returns `None` if the result falls off the board.
    #[inline(always)]
    pub fn shift(self, files: i8, ranks: i8) -> Option<Self> {
        Some(Square::new((self.file + files)?, (self.rank + ranks)?))
    }

    /// This square as seen by the given side, i.e. with its rank flipped for Black.
    #[inline(always)]
    pub fn perspective(self, side: Color) -> Self {
        Square::new(self.file, self.rank.perspective(side))
    }

    /// Maps a point on the screen to the square drawn under it.
    ///
    /// The board is drawn in `board` with White's first rank at the bottom.
    /// Returns `None` if the point lies outside of the board.
    pub fn from_pixel(point: Point, board: Rect) -> Option<Self> {
        if board.is_degenerate() || !board.contains(point) {
            return None;
        }

        let column = ((point.x - board.x) * 8. / board.width).floor();
        let row = ((point.y - board.y) * 8. / board.height).floor();

        let file = File::from_index(column.clamp(0., 7.) as u8)?;
        let rank = Rank::from_index(7 - row.clamp(0., 7.) as u8)?;

        Some(Square::new(file, rank))
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl Sub for Square {
    type Output = Delta;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Delta::new(self.file - rhs.file, self.rank - rhs.rank)
    }
}

/// Displaces this square, or returns `None` if the result falls off the board.
impl Add<Delta> for Square {
    type Output = Option<Self>;

    #[inline(always)]
    fn add(self, rhs: Delta) -> Self::Output {
        self.shift(rhs.files, rhs.ranks)
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
#[display(fmt = "unable to parse square; {}")]
pub enum ParseSquareError {
    #[display(fmt = "invalid file")]
    InvalidFile(ParseFileError),
    #[display(fmt = "invalid rank")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    #[instrument(level = "trace", err)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}

impl TryFrom<String> for Square {
    type Error = ParseSquareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(s: Square) -> Self {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Coincide;
    use test_strategy::proptest;

    #[proptest]
    fn new_constructs_square_from_pair_of_file_and_rank(f: File, r: Rank) {
        let s = Square::new(f, r);
        assert_eq!(s.file, f);
        assert_eq!(s.rank, r);
        assert_eq!(Square::at(f, r), s);
    }

    #[test]
    fn iter_returns_all_squares_in_order() {
        let squares: Vec<_> = Square::iter().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::new(File::A, Rank::First));
        assert_eq!(squares[63], Square::new(File::H, Rank::Eighth));
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
    }

    #[proptest]
    fn from_index_is_the_inverse_of_index(s: Square) {
        assert_eq!(Square::from_index(s.index()), Some(s));
    }

    #[proptest]
    fn from_index_returns_none_if_index_out_of_range(#[strategy(64usize..)] i: usize) {
        assert_eq!(Square::from_index(i), None);
    }

    #[proptest]
    fn square_is_ordered_by_index(a: Square, b: Square) {
        assert_eq!(a < b, a.index() < b.index());
    }

    #[proptest]
    fn subtracting_squares_returns_displacement(a: Square, b: Square) {
        assert_eq!(b + (a - b), Some(a));
    }

    #[proptest]
    fn shifting_square_shifts_file_and_rank(s: Square, files: i8, ranks: i8) {
        assert_eq!(
            s.shift(files, ranks),
            Option::zip(s.file + files, s.rank + ranks).map(|(f, r)| Square::new(f, r))
        );
    }

    #[proptest]
    fn perspective_flips_rank_only(s: Square, c: Color) {
        assert_eq!(s.perspective(c).file, s.file);
        assert_eq!(s.perspective(c).rank, s.rank.perspective(c));
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(s: Square) {
        assert_eq!(s.to_string().parse(), Ok(s));
    }

    #[proptest]
    fn parsing_square_fails_if_file_is_invalid(
        #[filter(!('a'..='h').contains(&#c))] c: char,
        r: Rank,
    ) {
        assert!(matches!(
            [c.to_string(), r.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidFile(_))
        ));
    }

    #[proptest]
    fn parsing_square_fails_if_rank_is_invalid(
        f: File,
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert!(matches!(
            [f.to_string(), c.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidRank(_))
        ));
    }

    #[test]
    fn parsing_empty_string_fails() {
        assert!(matches!(
            "".parse::<Square>(),
            Err(ParseSquareError::InvalidFile(ParseFileError::ParseCharError(_)))
        ));
    }

    #[test]
    fn pixels_map_to_squares_with_white_at_the_bottom() {
        let board = Rect::new(10., 20., 80., 80.);

        assert_eq!(
            Square::from_pixel(Point::new(10., 99.), board),
            Some(Square::new(File::A, Rank::First))
        );

        assert_eq!(
            Square::from_pixel(Point::new(89.9, 20.), board),
            Some(Square::new(File::H, Rank::Eighth))
        );

        assert_eq!(
            Square::from_pixel(Point::new(55., 65.), board),
            Some(Square::new(File::E, Rank::Fourth))
        );
    }

    #[test]
    fn pixels_outside_the_board_map_to_no_square() {
        let board = Rect::new(10., 20., 80., 80.);
        assert_eq!(Square::from_pixel(Point::new(9.9, 50.), board), None);
        assert_eq!(Square::from_pixel(Point::new(50., 100.), board), None);
        assert_eq!(Square::from_pixel(Point::new(f64::NAN, 50.), board), None);
        assert_eq!(Square::from_pixel(Point::new(0., 0.), Rect::default()), None);
    }

    #[proptest]
    fn center_of_each_square_maps_back_to_it(s: Square) {
        let board = Rect::new(0., 0., 800., 800.);
        let x = s.file.index() as f64 * 100. + 50.;
        let y = (7 - s.rank.index()) as f64 * 100. + 50.;
        assert_eq!(Square::from_pixel(Point::new(x, y), board), Some(s));
    }

    #[test]
    fn null_square_never_coincides_with_itself() {
        assert!(!None::<Square>.coincides(&None));
    }

    #[proptest]
    fn null_square_never_coincides_with_any_square(v: Square) {
        assert!(!None.coincides(&Some(v)));
        assert!(!Some(v).coincides(&None));
        assert!(Some(v).coincides(&Some(v)));
    }
}
