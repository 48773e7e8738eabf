use core::cmp::Ordering;

/// A strict-weak-order "less than" relation over keys of type `K`.
///
/// An `AvlMap` calls nothing but [`less`](Compare::less) to place and locate
/// keys; equality is inferred from `!less(a, b) && !less(b, a)`, so key types
/// never need `Eq`. The relation must be a strict weak order (irreflexive,
/// transitive, with transitive incomparability); a relation that falls short
/// leaves the tree contents unspecified, though never unsafe.
///
/// # Examples
///
/// ```
/// use larch_tree::{AvlMap, Compare};
///
/// /// Orders integers by descending value.
/// #[derive(Clone, Copy, Default)]
/// struct Descending;
///
/// impl Compare<i32> for Descending {
///     fn less(&self, a: &i32, b: &i32) -> bool {
///         b < a
///     }
/// }
///
/// let mut map: AvlMap<i32, &str, Descending> = AvlMap::default();
/// map.insert(1, "one");
/// map.insert(3, "three");
/// map.insert(2, "two");
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
pub trait Compare<K: ?Sized> {
    /// Returns `true` if `a` is ordered strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;
}

/// The default comparator: the natural `<` of the key type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Less;

impl<K: ?Sized + PartialOrd> Compare<K> for Less {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Orders keys by an [`Ordering`]-returning function, for callers that
/// already have a three-way comparison at hand.
#[derive(Clone, Copy, Debug)]
pub struct ByOrdering<F>(pub F);

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Compare<K> for ByOrdering<F> {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b) == Ordering::Less
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn less_is_strict() {
        assert!(Less.less(&1, &2));
        assert!(!Less.less(&2, &1));
        assert!(!Less.less(&1, &1));
    }

    #[test]
    fn closure_comparator() {
        let reversed = ByOrdering(|a: &u8, b: &u8| b.cmp(a));
        assert!(reversed.less(&2, &1));
        assert!(!reversed.less(&1, &2));
        assert!(!reversed.less(&1, &1));
    }
}
