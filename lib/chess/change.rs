use crate::chess::{Piece, Position, Square};
use arrayvec::ArrayVec;
use derive_more::Display;

/// A reversible mutation of a single square.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[display(fmt = "{}: {} -> {}", "Show(square)", "Show(before)", "Show(after)")]
pub struct StateChange {
    square: Option<Square>,
    before: Option<Piece>,
    after: Option<Piece>,
}

struct Show<'a, T>(&'a Option<T>);

impl<T: std::fmt::Display> std::fmt::Display for Show<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("-"),
        }
    }
}

impl StateChange {
    /// Constructs [`StateChange`] that replaces `before` by `after` on `square`.
    #[inline(always)]
    pub fn new(square: Option<Square>, before: Option<Piece>, after: Option<Piece>) -> Self {
        StateChange {
            square,
            before,
            after,
        }
    }

    /// A change that touches no square.
    #[inline(always)]
    pub fn neutral() -> Self {
        StateChange::new(None, None, None)
    }

    /// The square mutated, or `None` if this change is neutral.
    #[inline(always)]
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    /// The occupant of the square before this change.
    #[inline(always)]
    pub fn before(&self) -> Option<Piece> {
        self.before
    }

    /// The occupant of the square after this change.
    #[inline(always)]
    pub fn after(&self) -> Option<Piece> {
        self.after
    }

    /// Writes the occupant after this change.
    #[inline(always)]
    pub fn apply(&self, pos: &mut Position) {
        if let Some(sq) = self.square {
            pos.put(sq, self.after);
        }
    }

    /// Writes the occupant before this change back.
    #[inline(always)]
    pub fn reverse(&self, pos: &mut Position) {
        if let Some(sq) = self.square {
            pos.put(sq, self.before);
        }
    }
}

/// The ordered [`StateChange`]s that make up a single move.
///
/// Changes are applied first to last and reversed last to first.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Changes(ArrayVec<StateChange, 4>);

impl Changes {
    /// Appends a change, neutral changes are dropped.
    ///
    /// # Panics
    ///
    /// Panics if more than 4 squares are mutated, which no move ever does.
    #[inline(always)]
    pub fn push(&mut self, c: StateChange) {
        if c.square().is_some() {
            self.0.push(c);
        }
    }

    /// The number of squares mutated.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no square is mutated.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies every change from first to last.
    pub fn apply(&self, pos: &mut Position) {
        for c in self.iter() {
            c.apply(pos);
        }
    }

    /// Reverses every change from last to first.
    pub fn reverse(&self, pos: &mut Position) {
        for c in self.iter().rev() {
            c.reverse(pos);
        }
    }

    /// Returns an iterator over the changes in the order they are applied.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &StateChange> + ExactSizeIterator {
        self.0.iter()
    }

    /// The squares mutated, in the order they are applied.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.iter().filter_map(StateChange::square)
    }
}

impl<'a> IntoIterator for &'a Changes {
    type Item = &'a StateChange;
    type IntoIter = std::slice::Iter<'a, StateChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
