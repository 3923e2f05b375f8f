use crate::chess::Color;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::convert::{TryFrom, TryInto};
use std::{char::ParseCharError, ops::Add, ops::Sub, str::FromStr};

/// A row on the chess board.
#[derive(
    Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(try_from = "char", into = "char")]
#[repr(u8)]
pub enum Rank {
    #[display(fmt = "1")]
    First,
    #[display(fmt = "2")]
    Second,
    #[display(fmt = "3")]
    Third,
    #[display(fmt = "4")]
    Fourth,
    #[display(fmt = "5")]
    Fifth,
    #[display(fmt = "6")]
    Sixth,
    #[display(fmt = "7")]
    Seventh,
    #[display(fmt = "8")]
    Eighth,
}

impl Rank {
    /// All ranks ordered by [index][`Rank::index`].
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];

    /// Constructs [`Rank`] from index, or `None` if `i` is not in the range (0..=7).
    #[inline(always)]
    pub fn from_index(i: u8) -> Option<Self> {
        i.try_into().ok()
    }

    /// Constructs [`Rank`] from its digit, or `None` if `c` is not in the range ('1'..='8').
    #[inline(always)]
    pub fn from_digit(c: char) -> Option<Self> {
        c.try_into().ok()
    }

    /// This rank's index in the range (0..=7).
    #[inline(always)]
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Returns an iterator over [`Rank`]s ordered by [index][`Rank::index`].
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }

    /// This rank as seen by the given side, i.e. flipped for Black.
    ///
    /// [`Rank::First`] is White's back rank and Black's eighth.
    #[inline(always)]
    pub fn perspective(self, side: Color) -> Self {
        match side {
            Color::White => self,
            Color::Black => Self::ALL[7 - self.index() as usize],
        }
    }
}

/// Shifts this rank, or returns `None` if the result falls off the board.
impl Add<i8> for Rank {
    type Output = Option<Self>;

    #[inline(always)]
    fn add(self, rhs: i8) -> Self::Output {
        let i = (self.index() as i8).checked_add(rhs)?;
        Self::from_index(i.try_into().ok()?)
    }
}

/// Shifts this rank, or returns `None` if the result falls off the board.
impl Sub<i8> for Rank {
    type Output = Option<Self>;

    #[inline(always)]
    fn sub(self, rhs: i8) -> Self::Output {
        let i = (self.index() as i8).checked_sub(rhs)?;
        Self::from_index(i.try_into().ok()?)
    }
}

impl Sub for Rank {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.index() as i8 - rhs.index() as i8
    }
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse rank")]
pub enum ParseRankError {
    ParseCharError(ParseCharError),
    InvalidRank(InvalidRank),
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<char>()?.try_into()?)
    }
}

/// The reason why converting [`Rank`] from a digit failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected digit in the range `('1'..='8')`")]
pub struct InvalidRank;

impl TryFrom<char> for Rank {
    type Error = InvalidRank;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '1'..='8' => Ok(Self::ALL[(c as u8 - b'1') as usize]),
            _ => Err(InvalidRank),
        }
    }
}

impl From<Rank> for char {
    fn from(r: Rank) -> char {
        (b'1' + r.index()) as char
    }
}

/// The reason why converting [`Rank`] from index failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected integer in the range `(0..=7)`")]
pub struct RankOutOfRange;

impl TryFrom<u8> for Rank {
    type Error = RankOutOfRange;

    fn try_from(i: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(i as usize).copied().ok_or(RankOutOfRange)
    }
}

impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Coincide;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn rank_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Rank>>(), size_of::<Rank>());
    }

    #[test]
    fn iter_returns_iterator_over_ranks_in_order() {
        assert_eq!(
            Rank::iter().collect::<Vec<_>>(),
            (0..=7).filter_map(Rank::from_index).collect::<Vec<_>>()
        );
    }

    #[proptest]
    fn parsing_printed_rank_is_an_identity(r: Rank) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[proptest]
    fn parsing_rank_fails_for_digits_out_of_range(#[filter(!('1'..='8').contains(&#c))] c: char) {
        assert_eq!(
            c.to_string().parse::<Rank>(),
            Err(ParseRankError::InvalidRank(InvalidRank))
        );
    }

    #[proptest]
    fn rank_can_be_converted_to_char(r: Rank) {
        assert_eq!(Rank::from_digit(char::from(r)), Some(r));
    }

    #[proptest]
    fn from_index_constructs_rank_by_index(#[strategy(0u8..8)] i: u8) {
        assert_eq!(Rank::from_index(i).map(|r| r.index()), Some(i));
    }

    #[proptest]
    fn from_index_returns_none_if_index_out_of_range(#[strategy(8u8..)] i: u8) {
        assert_eq!(Rank::from_index(i), None);
        assert_eq!(Rank::try_from(i), Err(RankOutOfRange));
    }

    #[proptest]
    fn adding_to_rank_stays_on_the_board_or_returns_none(r: Rank, n: i8) {
        let i = r.index() as i16 + n as i16;
        assert_eq!(r + n, u8::try_from(i).ok().and_then(Rank::from_index));
    }

    #[proptest]
    fn subtracting_ranks_gives_distance(a: Rank, b: Rank) {
        assert_eq!(a - b, a.index() as i8 - b.index() as i8);
        assert_eq!(b + (a - b), Some(a));
    }

    #[proptest]
    fn perspective_of_white_is_the_identity(r: Rank) {
        assert_eq!(r.perspective(Color::White), r);
    }

    #[proptest]
    fn perspective_of_black_flips_the_rank(r: Rank) {
        assert_eq!(r.perspective(Color::Black).index(), 7 - r.index());
        assert_eq!(r.perspective(Color::Black).perspective(Color::Black), r);
    }

    #[test]
    fn null_rank_never_coincides_with_itself() {
        assert!(!None::<Rank>.coincides(&None));
    }

    #[proptest]
    fn null_rank_never_coincides_with_any_rank(v: Rank) {
        assert!(!None.coincides(&Some(v)));
        assert!(!Some(v).coincides(&None));
        assert!(Some(v).coincides(&Some(v)));
    }
}
