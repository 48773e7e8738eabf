//! An ordered map with an injectable key order, backed by a height-balanced
//! (AVL) binary search tree.

mod entry;

pub use entry::{Entry, OccupiedEntry, VacantEntry};

use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Bound, Index, RangeBounds};

use crate::compare::{Compare, Less};
use crate::error::OutOfRange;
use crate::pair::Pair;
use crate::raw::{Handle, RawAvlMap};

/// An ordered map with an injectable key order, backed by a height-balanced
/// (AVL) binary search tree.
///
/// Keys are kept sorted by a [`Compare`] implementation chosen at
/// construction time; by default, [`Less`] orders keys with `<`. Equality is
/// derived from the order - two keys are equal when neither orders before the
/// other - so key types never need `Eq` or `Hash`.
///
/// Unlike [`BTreeMap`](alloc::collections::BTreeMap), [`insert`](Self::insert)
/// is idempotent: inserting an already-present key keeps the stored value and
/// reports that nothing happened. Use the [`Entry`] API or
/// [`get_mut`](Self::get_mut) to overwrite.
///
/// Lookups, insertion, and removal take `O(log n)` time; iteration visits
/// entries in sorted order.
///
/// # Examples
///
/// ```rust
/// use larch_tree::AvlMap;
///
/// let mut movies = AvlMap::new();
///
/// movies.insert(1972, "The Godfather");
/// movies.insert(1994, "The Shawshank Redemption");
/// movies.insert(2008, "The Dark Knight");
///
/// assert_eq!(movies.get(&1972), Some(&"The Godfather"));
/// assert_eq!(movies.len(), 3);
///
/// // Entries come back in key order.
/// let years: Vec<i32> = movies.keys().copied().collect();
/// assert_eq!(years, [1972, 1994, 2008]);
/// ```
///
/// A custom order is injected as a comparator:
///
/// ```rust
/// use larch_tree::{AvlMap, ByOrdering};
///
/// let mut map = AvlMap::with_comparator(ByOrdering(|a: &i32, b: &i32| b.cmp(a)));
/// map.extend([(1, "a"), (2, "b"), (3, "c")]);
///
/// let keys: Vec<i32> = map.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
pub struct AvlMap<K, V, C = Less> {
    raw: RawAvlMap<K, V, C>,
}

impl<K, V> AvlMap<K, V> {
    /// Creates an empty map ordered by `<`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map: AvlMap<i32, &str> = AvlMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawAvlMap::new(Less) }
    }

    /// Creates an empty map ordered by `<`, with room for `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let map: AvlMap<i32, &str> = AvlMap::with_capacity(16);
    /// assert!(map.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { raw: RawAvlMap::with_capacity(capacity, Less) }
    }
}

impl<K, V, C> AvlMap<K, V, C> {
    /// Creates an empty map ordered by `comp`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::{AvlMap, ByOrdering};
    ///
    /// let mut map = AvlMap::with_comparator(ByOrdering(|a: &u8, b: &u8| b.cmp(a)));
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    /// assert_eq!(map.first_key_value(), Some((&2, &'b')));
    /// ```
    #[must_use]
    pub const fn with_comparator(comp: C) -> Self {
        Self { raw: RawAvlMap::new(comp) }
    }

    /// Creates an empty map ordered by `comp`, with room for `capacity`
    /// entries.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comp: C) -> Self {
        Self { raw: RawAvlMap::with_capacity(capacity, comp) }
    }

    /// Returns a reference to the map's comparator.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    /// Constant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the largest number of entries the map can ever hold, bounded
    /// by the handle space of the backing arena.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        Handle::MAX
    }

    /// Returns the number of entries the map can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Removes all entries from the map.
    ///
    /// # Complexity
    /// `O(n)` to drop the stored pairs; no per-node traversal is needed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the entry with the smallest key, or `None` if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|handle| self.raw.key_value(handle))
    }

    /// Returns the entry with the largest key, or `None` if the map is empty.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|handle| self.raw.key_value(handle))
    }

    /// Returns a cursor over the entry with the smallest key, or the end
    /// cursor if the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(3, "c");
    /// map.insert(1, "a");
    ///
    /// let mut cursor = map.cursor_front();
    /// assert_eq!(cursor.key(), Some(&1));
    /// cursor.move_next();
    /// assert_eq!(cursor.key(), Some(&3));
    /// cursor.move_next();
    /// assert!(cursor.is_end());
    /// ```
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, K, V, C> {
        Cursor { map: self, node: self.raw.first() }
    }

    /// Returns the end cursor: the position one past the largest key.
    ///
    /// Moving the end cursor backwards lands on the entry with the largest
    /// key.
    #[must_use]
    pub fn cursor_end(&self) -> Cursor<'_, K, V, C> {
        Cursor { map: self, node: None }
    }

    /// Returns an iterator over the entries in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(3, "c");
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let entries: Vec<(&i32, &&str)> = map.iter().collect();
    /// assert_eq!(entries, [(&1, &"a"), (&2, &"b"), (&3, &"c")]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Returns an iterator over the entries in key order, with mutable
    /// references to the values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    ///
    /// for (_, value) in map.iter_mut() {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.get(&1), Some(&11));
    /// assert_eq!(map.get(&2), Some(&21));
    /// ```
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V, C> {
        let front = self.raw.first();
        let back = self.raw.last();
        let remaining = self.raw.len();
        IterMut { tree: &mut self.raw, front, back, remaining, marker: PhantomData }
    }

    /// Returns an iterator over the keys in order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values, in key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values, in key
    /// order.
    #[must_use]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V, C> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Consumes the map, returning an iterator over the keys in order.
    #[must_use]
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys { inner: self.into_iter() }
    }

    /// Consumes the map, returning an iterator over the values in key order.
    #[must_use]
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues { inner: self.into_iter() }
    }
}

impl<K, V, C: Compare<K>> AvlMap<K, V, C> {
    /// Returns a reference to the value for `key`, or `None` if absent.
    ///
    /// # Complexity
    /// `O(log n)`, with at most two comparator calls per level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.raw.search(key).map(|handle| self.raw.value(handle))
    }

    /// Returns a mutable reference to the value for `key`, or `None` if
    /// absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    #[must_use]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.raw.search(key)?;
        Some(self.raw.value_mut(handle))
    }

    /// Returns the stored key and value for `key`, or `None` if absent.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.search(key).map(|handle| self.raw.key_value(handle))
    }

    /// Returns `true` if the map contains `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key).is_some()
    }

    /// Returns a reference to the value for `key`, or [`OutOfRange`] if the
    /// key is absent.
    ///
    /// This is the checked, non-panicking counterpart of indexing.
    ///
    /// # Errors
    /// Returns [`OutOfRange`] if the map has no entry for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::{AvlMap, OutOfRange};
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(OutOfRange));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V, OutOfRange> {
        self.get(key).ok_or(OutOfRange)
    }

    /// Returns a mutable reference to the value for `key`, or [`OutOfRange`]
    /// if the key is absent.
    ///
    /// # Errors
    /// Returns [`OutOfRange`] if the map has no entry for `key`.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, OutOfRange> {
        self.get_mut(key).ok_or(OutOfRange)
    }

    /// Inserts `key` with `value` if the key is absent.
    ///
    /// Returns a cursor over the entry for `key` and whether an insertion
    /// happened. When the key is already present, the stored value is kept
    /// and `value` is dropped; use the [`Entry`] API to overwrite.
    ///
    /// # Complexity
    /// `O(log n)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    ///
    /// let (cursor, inserted) = map.insert(1, "a");
    /// assert!(inserted);
    /// assert_eq!(cursor.key_value(), Some((&1, &"a")));
    ///
    /// // A second insertion of the same key changes nothing.
    /// let (cursor, inserted) = map.insert(1, "z");
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor<'_, K, V, C>, bool) {
        let (node, inserted) = self.raw.insert(key, value);
        (Cursor { map: self, node: Some(node) }, inserted)
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// # Complexity
    /// `O(log n)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the map, returning the stored key and value if the
    /// key was present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove(key)
    }

    /// Removes every entry whose key falls within `range`, returning how many
    /// were removed.
    ///
    /// The doomed keys are collected before any entry is removed, so the
    /// range walk never crosses a node the removal has already rewired.
    ///
    /// # Complexity
    /// `O(m log n)` for `m` removed entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.extend([(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
    ///
    /// assert_eq!(map.remove_range(2..4), 2);
    /// let keys: Vec<i32> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 4]);
    /// ```
    pub fn remove_range<R>(&mut self, range: R) -> usize
    where
        K: Clone,
        R: RangeBounds<K>,
    {
        let mut doomed = Vec::new();
        let mut current = match range.start_bound() {
            Bound::Unbounded => self.raw.first(),
            Bound::Included(start) => self.raw.lower(start),
            Bound::Excluded(start) => self.raw.higher(start),
        };
        while let Some(handle) = current {
            let key = self.raw.key(handle);
            let in_range = match range.end_bound() {
                Bound::Unbounded => true,
                Bound::Included(end) => !self.raw.comparator().less(end, key),
                Bound::Excluded(end) => self.raw.comparator().less(key, end),
            };
            if !in_range {
                break;
            }
            doomed.push(key.clone());
            current = self.raw.successor(handle);
        }

        for key in &doomed {
            self.raw.remove(key);
        }
        doomed.len()
    }

    /// Returns a cursor over the entry for `key`, or the end cursor if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.find(&1).key(), Some(&1));
    /// assert!(map.find(&2).is_end());
    /// ```
    #[must_use]
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, C> {
        Cursor { map: self, node: self.raw.search(key) }
    }

    /// Returns a cursor over the first entry whose key is not less than
    /// `key`, or the end cursor if every key is smaller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.extend([(1, "a"), (3, "c")]);
    ///
    /// assert_eq!(map.lower_bound(&2).key(), Some(&3));
    /// assert_eq!(map.lower_bound(&3).key(), Some(&3));
    /// assert!(map.lower_bound(&4).is_end());
    /// ```
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        Cursor { map: self, node: self.raw.lower(key) }
    }

    /// Returns a cursor over the first entry whose key is strictly greater
    /// than `key`, or the end cursor if every key is smaller or equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.extend([(1, "a"), (3, "c")]);
    ///
    /// assert_eq!(map.upper_bound(&1).key(), Some(&3));
    /// assert!(map.upper_bound(&3).is_end());
    /// ```
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        Cursor { map: self, node: self.raw.higher(key) }
    }

    /// Returns the half-open cursor range of entries whose keys are equal to
    /// `key`: `(lower_bound, upper_bound)`.
    ///
    /// Keys are unique, so the range spans at most one entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.extend([(1, "a"), (2, "b"), (3, "c")]);
    ///
    /// let (mut low, high) = map.equal_range(&2);
    /// assert_eq!(low.key(), Some(&2));
    /// low.move_next();
    /// assert_eq!(low, high);
    /// ```
    #[must_use]
    pub fn equal_range(&self, key: &K) -> (Cursor<'_, K, V, C>, Cursor<'_, K, V, C>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns the entry for `key`, for in-place inspection and manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.entry(1).or_insert(10);
    /// *map.entry(1).or_insert(99) += 1;
    /// assert_eq!(map.get(&1), Some(&11));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C> {
        match self.raw.search(&key) {
            Some(node) => Entry::Occupied(OccupiedEntry { node, tree: &mut self.raw }),
            None => Entry::Vacant(VacantEntry { key, tree: &mut self.raw }),
        }
    }
}

// ─────────────────────────── Trait implementations ──────────────────────────

impl<K, V, C: Default> Default for AvlMap<K, V, C> {
    fn default() -> Self {
        Self { raw: RawAvlMap::new(C::default()) }
    }
}

impl<K: Clone, V: Clone, C: Clone + Compare<K>> Clone for AvlMap<K, V, C> {
    /// Clones the map by re-inserting every entry in key order into a fresh
    /// tree; node handles are not preserved across the clone.
    fn clone(&self) -> Self {
        let mut clone = Self {
            raw: RawAvlMap::with_capacity(self.len(), self.raw.comparator().clone()),
        };
        for (key, value) in self {
            clone.raw.insert(key.clone(), value.clone());
        }
        clone
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AvlMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AvlMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for AvlMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for AvlMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, C> Ord for AvlMap<K, V, C> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Hash, V: Hash, C> Hash for AvlMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self {
            entry.hash(state);
        }
    }
}

/// Panics if the key is absent. For insertion-on-read semantics use
/// [`AvlMap::entry`] with [`Entry::or_default`] instead.
impl<K, V, C: Compare<K>> Index<&K> for AvlMap<K, V, C> {
    type Output = V;

    /// # Panics
    /// Panics if the map has no entry for `key`.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for AvlMap<K, V, C> {
    /// Builds a map from an iterator of pairs. On duplicate keys the first
    /// pair wins, matching [`insert`](AvlMap::insert).
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<Pair<K, V>> for AvlMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = Pair<K, V>>>(iter: I) -> Self {
        iter.into_iter().map(Pair::into_tuple).collect()
    }
}

impl<K, V, C: Compare<K> + Default, const N: usize> From<[(K, V); N]> for AvlMap<K, V, C> {
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let map: AvlMap<i32, &str> = AvlMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.get(&2), Some(&"b"));
    /// ```
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for AvlMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.raw.insert(key, value);
        }
    }
}

impl<K, V, C: Compare<K>> Extend<Pair<K, V>> for AvlMap<K, V, C> {
    fn extend<I: IntoIterator<Item = Pair<K, V>>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(Pair::into_tuple));
    }
}

impl<'a, K: Copy, V: Copy, C: Compare<K>> Extend<(&'a K, &'a V)> for AvlMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut AvlMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for AvlMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter { inner: self.raw.drain_to_vec().into_iter() }
    }
}

// ──────────────────────────────── Cursor ────────────────────────────────────

/// A position within an [`AvlMap`]: either over one entry, or the end
/// position one past the largest key.
///
/// A cursor names a node, not a key rank: it stays on the same entry through
/// rebalancing and through removals of other entries. The end cursor is also
/// the result of failed [`find`](AvlMap::find)s and exhausted bound queries;
/// moving it backwards recovers the entry with the largest key.
///
/// # Examples
///
/// ```rust
/// use larch_tree::AvlMap;
///
/// let mut map = AvlMap::new();
/// map.extend([(1, "a"), (2, "b")]);
///
/// let mut cursor = map.cursor_end();
/// cursor.move_prev();
/// assert_eq!(cursor.key_value(), Some((&2, &"b")));
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&1));
/// cursor.move_prev();
/// assert!(cursor.is_end());
/// ```
pub struct Cursor<'a, K, V, C = Less> {
    map: &'a AvlMap<K, V, C>,
    node: Option<Handle>,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    /// Returns the key of the current entry, or `None` at the end position.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.node.map(|handle| self.map.raw.key(handle))
    }

    /// Returns the value of the current entry, or `None` at the end position.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.node.map(|handle| self.map.raw.value(handle))
    }

    /// Returns the current entry, or `None` at the end position.
    #[must_use]
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.node.map(|handle| self.map.raw.key_value(handle))
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Moves to the entry with the next larger key. From the entry with the
    /// largest key this reaches the end position; the end position is
    /// absorbing.
    pub fn move_next(&mut self) {
        if let Some(handle) = self.node {
            self.node = self.map.raw.successor(handle);
        }
    }

    /// Moves to the entry with the next smaller key. From the end position
    /// this reaches the entry with the largest key; from the smallest key it
    /// reaches the end position.
    pub fn move_prev(&mut self) {
        self.node = match self.node {
            None => self.map.raw.last(),
            Some(handle) => self.map.raw.predecessor(handle),
        };
    }
}

impl<K, V, C> Clone for Cursor<'_, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for Cursor<'_, K, V, C> {}

impl<K, V, C> PartialEq for Cursor<'_, K, V, C> {
    /// Two cursors are equal when they sit on the same node of the same map
    /// (or both at its end position); keys and values are never compared.
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.map, other.map) && self.node == other.node
    }
}

impl<K, V, C> Eq for Cursor<'_, K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Cursor<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key_value() {
            Some(entry) => f.debug_tuple("Cursor").field(&entry).finish(),
            None => f.debug_tuple("Cursor").field(&"end").finish(),
        }
    }
}

// ─────────────────────────────── Iterators ──────────────────────────────────

/// An iterator over the entries of an [`AvlMap`] in key order.
///
/// Created by [`AvlMap::iter`].
pub struct Iter<'a, K, V, C = Less> {
    tree: &'a RawAvlMap<K, V, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(handle);
        Some(self.tree.key_value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(handle);
        Some(self.tree.key_value(handle))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {}
impl<K, V, C> core::iter::FusedIterator for Iter<'_, K, V, C> {}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self { tree: self.tree, front: self.front, back: self.back, remaining: self.remaining }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Iter<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the entries of an [`AvlMap`] in key order, with mutable
/// references to the values.
///
/// Created by [`AvlMap::iter_mut`].
pub struct IterMut<'a, K, V, C = Less> {
    tree: *mut RawAvlMap<K, V, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
    marker: PhantomData<(&'a K, &'a mut V)>,
}

impl<'a, K, V, C> Iterator for IterMut<'a, K, V, C> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        // SAFETY: `tree` came from a `&'a mut` borrow and stays valid for the
        // iterator's lifetime. Navigation reads only node links and keys;
        // values are touched exclusively through `value_mut_ptr`. Each entry
        // is yielded at most once, so no two returned value references alias.
        unsafe {
            self.front = RawAvlMap::successor_ptr(self.tree, handle);
            let key = &RawAvlMap::node_ptr(self.tree, handle).key;
            let value = RawAvlMap::value_mut_ptr(self.tree, handle);
            Some((key, value))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for IterMut<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        // SAFETY: See `next()`; the `remaining` counter keeps the two ends
        // from yielding a slot twice.
        unsafe {
            self.back = RawAvlMap::predecessor_ptr(self.tree, handle);
            let key = &RawAvlMap::node_ptr(self.tree, handle).key;
            let value = RawAvlMap::value_mut_ptr(self.tree, handle);
            Some((key, value))
        }
    }
}

impl<K, V, C> ExactSizeIterator for IterMut<'_, K, V, C> {}
impl<K, V, C> core::iter::FusedIterator for IterMut<'_, K, V, C> {}

// SAFETY: `IterMut` behaves like `&mut AvlMap`; it is `Send`/`Sync` exactly
// when a mutable reference to the map's contents would be.
unsafe impl<K: Send, V: Send, C: Send> Send for IterMut<'_, K, V, C> {}
unsafe impl<K: Sync, V: Sync, C: Sync> Sync for IterMut<'_, K, V, C> {}

/// An iterator over the keys of an [`AvlMap`] in order.
///
/// Created by [`AvlMap::keys`].
pub struct Keys<'a, K, V, C = Less> {
    inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Keys<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {}
impl<K, V, C> core::iter::FusedIterator for Keys<'_, K, V, C> {}

impl<K, V, C> Clone for Keys<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<K: fmt::Debug, V, C> fmt::Debug for Keys<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the values of an [`AvlMap`] in key order.
///
/// Created by [`AvlMap::values`].
pub struct Values<'a, K, V, C = Less> {
    inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Values<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, C> ExactSizeIterator for Values<'_, K, V, C> {}
impl<K, V, C> core::iter::FusedIterator for Values<'_, K, V, C> {}

impl<K, V, C> Clone for Values<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<K, V: fmt::Debug, C> fmt::Debug for Values<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over mutable references to the values of an [`AvlMap`] in key
/// order.
///
/// Created by [`AvlMap::values_mut`].
pub struct ValuesMut<'a, K, V, C = Less> {
    inner: IterMut<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for ValuesMut<'a, K, V, C> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for ValuesMut<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, C> ExactSizeIterator for ValuesMut<'_, K, V, C> {}
impl<K, V, C> core::iter::FusedIterator for ValuesMut<'_, K, V, C> {}

/// An owning iterator over the entries of an [`AvlMap`] in key order.
///
/// Created by the [`IntoIterator`] implementation of [`AvlMap`].
#[derive(Clone, Debug)]
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> core::iter::FusedIterator for IntoIter<K, V> {}

/// An owning iterator over the keys of an [`AvlMap`] in order.
///
/// Created by [`AvlMap::into_keys`].
#[derive(Clone, Debug)]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}
impl<K, V> core::iter::FusedIterator for IntoKeys<K, V> {}

/// An owning iterator over the values of an [`AvlMap`] in key order.
///
/// Created by [`AvlMap::into_values`].
#[derive(Clone, Debug)]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}
impl<K, V> core::iter::FusedIterator for IntoValues<K, V> {}
