use core::fmt;

/// An ordered two-tuple of a key and a value.
///
/// `Pair` is the key/value product type the bulk constructors produce and
/// consume: it compares structurally for equality and lexicographically for
/// ordering (`first` decides, `second` breaks ties), and converts freely to
/// and from a plain `(K, V)` tuple.
///
/// # Examples
///
/// ```
/// use larch_tree::{AvlMap, Pair};
///
/// let pairs = [Pair::new(2, "b"), Pair::new(1, "a")];
/// let map: AvlMap<i32, &str> = pairs.into_iter().collect();
/// assert_eq!(map.get(&1), Some(&"a"));
///
/// assert!(Pair::new(1, "z") < Pair::new(2, "a"));
/// assert!(Pair::new(1, "a") < Pair::new(1, "z"));
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pair<K, V> {
    /// The key. Immutable once the pair is stored in a map.
    pub first: K,
    /// The value.
    pub second: V,
}

impl<K, V> Pair<K, V> {
    /// Creates a pair from a key and a value.
    #[inline]
    pub const fn new(first: K, second: V) -> Self {
        Self { first, second }
    }

    /// Decomposes the pair into its key and value.
    #[inline]
    pub fn into_tuple(self) -> (K, V) {
        (self.first, self.second)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    #[inline]
    fn from((first, second): (K, V)) -> Self {
        Self { first, second }
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    #[inline]
    fn from(pair: Pair<K, V>) -> Self {
        (pair.first, pair.second)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Pair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pair").field(&self.first).field(&self.second).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn lexicographic_order() {
        assert!(Pair::new(1, 9) < Pair::new(2, 0));
        assert!(Pair::new(1, 0) < Pair::new(1, 9));
        assert_eq!(Pair::new(1, 0), Pair::new(1, 0));
        assert_ne!(Pair::new(1, 0), Pair::new(1, 1));
    }

    #[test]
    fn tuple_round_trip() {
        let pair: Pair<u8, &str> = (3, "three").into();
        assert_eq!(pair.first, 3);
        assert_eq!(pair.second, "three");
        assert_eq!(pair.into_tuple(), (3, "three"));
    }
}
