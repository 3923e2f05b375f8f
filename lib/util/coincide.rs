/// Trait for values that may be absent, where absence never matches anything.
///
/// Unlike [`PartialEq`] on [`Option`], `None` does not coincide with `None`.
pub trait Coincide {
    /// Whether both values are present and equal.
    fn coincides(&self, other: &Self) -> bool;
}

impl<T: Eq> Coincide for Option<T> {
    #[inline(always)]
    fn coincides(&self, other: &Self) -> bool {
        matches!((self, other), (Some(a), Some(b)) if a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn none_never_coincides_with_itself() {
        assert!(!None::<u8>.coincides(&None));
    }

    #[proptest]
    fn none_never_coincides_with_some(v: u8) {
        assert!(!None.coincides(&Some(v)));
        assert!(!Some(v).coincides(&None));
    }

    #[proptest]
    fn present_values_coincide_if_equal(a: u8, b: u8) {
        assert_eq!(Some(a).coincides(&Some(b)), a == b);
    }
}
