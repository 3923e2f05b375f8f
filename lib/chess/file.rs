use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::convert::{TryFrom, TryInto};
use std::{char::ParseCharError, ops::Add, ops::Sub, str::FromStr};

/// A column on the chess board.
#[derive(
    Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(try_from = "char", into = "char")]
#[repr(u8)]
pub enum File {
    #[display(fmt = "a")]
    A,
    #[display(fmt = "b")]
    B,
    #[display(fmt = "c")]
    C,
    #[display(fmt = "d")]
    D,
    #[display(fmt = "e")]
    E,
    #[display(fmt = "f")]
    F,
    #[display(fmt = "g")]
    G,
    #[display(fmt = "h")]
    H,
}

impl File {
    /// All files ordered by [index][`File::index`].
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Constructs [`File`] from index, or `None` if `i` is not in the range (0..=7).
    #[inline(always)]
    pub fn from_index(i: u8) -> Option<Self> {
        i.try_into().ok()
    }

    /// Constructs [`File`] from its letter, or `None` if `c` is not in the range ('a'..='h').
    #[inline(always)]
    pub fn from_letter(c: char) -> Option<Self> {
        c.try_into().ok()
    }

    /// This file's index in the range (0..=7).
    #[inline(always)]
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Returns an iterator over [`File`]s ordered by [index][`File::index`].
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }
}

/// Shifts this file, or returns `None` if the result falls off the board.
impl Add<i8> for File {
    type Output = Option<Self>;

    #[inline(always)]
    fn add(self, rhs: i8) -> Self::Output {
        let i = (self.index() as i8).checked_add(rhs)?;
        Self::from_index(i.try_into().ok()?)
    }
}

/// Shifts this file, or returns `None` if the result falls off the board.
impl Sub<i8> for File {
    type Output = Option<Self>;

    #[inline(always)]
    fn sub(self, rhs: i8) -> Self::Output {
        let i = (self.index() as i8).checked_sub(rhs)?;
        Self::from_index(i.try_into().ok()?)
    }
}

impl Sub for File {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.index() as i8 - rhs.index() as i8
    }
}

/// The reason why parsing [`File`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse file")]
pub enum ParseFileError {
    ParseCharError(ParseCharError),
    InvalidFile(InvalidFile),
}

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<char>()?.try_into()?)
    }
}

/// The reason why converting [`File`] from a letter failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected lower case letter in the range `('a'..='h')`")]
pub struct InvalidFile;

impl TryFrom<char> for File {
    type Error = InvalidFile;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'a'..='h' => Ok(Self::ALL[(c as u8 - b'a') as usize]),
            _ => Err(InvalidFile),
        }
    }
}

impl From<File> for char {
    fn from(f: File) -> char {
        (b'a' + f.index()) as char
    }
}

/// The reason why converting [`File`] from index failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected integer in the range `(0..=7)`")]
pub struct FileOutOfRange;

impl TryFrom<u8> for File {
    type Error = FileOutOfRange;

    fn try_from(i: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(i as usize).copied().ok_or(FileOutOfRange)
    }
}

impl From<File> for u8 {
    fn from(f: File) -> u8 {
        f.index()
    }
}
