use derive_more::Display;

/// The displacement between two [`Square`][`crate::chess::Square`]s.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "({:+}, {:+})", files, ranks)]
pub struct Delta {
    /// Signed distance along the ranks, towards the h-file if positive.
    pub files: i8,
    /// Signed distance along the files, towards the eighth rank if positive.
    pub ranks: i8,
}

impl Delta {
    /// Constructs [`Delta`] from a pair of signed distances.
    #[inline(always)]
    pub const fn new(files: i8, ranks: i8) -> Self {
        Delta { files, ranks }
    }

    /// Scales this displacement by `k`, or returns `None` on overflow.
    #[inline(always)]
    pub fn times(self, k: i8) -> Option<Self> {
        Some(Delta::new(self.files.checked_mul(k)?, self.ranks.checked_mul(k)?))
    }

    /// The unit step in the direction of this displacement.
    #[inline(always)]
    pub fn signum(self) -> Self {
        Delta::new(self.files.signum(), self.ranks.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn scaling_by_one_is_the_identity(d: Delta) {
        assert_eq!(d.times(1), Some(d));
    }

    #[proptest]
    fn scaling_by_zero_is_null(d: Delta) {
        assert_eq!(d.times(0), Some(Delta::new(0, 0)));
    }

    #[proptest]
    fn signum_has_unit_components(d: Delta) {
        let s = d.signum();
        assert!((-1..=1).contains(&s.files) && (-1..=1).contains(&s.ranks));
        assert_eq!(s.files, d.files.signum());
        assert_eq!(s.ranks, d.ranks.signum());
    }
}
