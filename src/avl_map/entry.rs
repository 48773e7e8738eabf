use core::fmt;
use core::mem;

use crate::compare::{Compare, Less};
use crate::raw::{Handle, RawAvlMap};

/// A view into a single entry of an [`AvlMap`](super::AvlMap), which may be
/// vacant or occupied.
///
/// Created by [`AvlMap::entry`](super::AvlMap::entry). This is the map's
/// overwrite-capable surface: plain [`insert`](super::AvlMap::insert) never
/// replaces a stored value, an [`OccupiedEntry`] can.
///
/// # Examples
///
/// ```rust
/// use larch_tree::AvlMap;
///
/// let mut counts: AvlMap<&str, u32> = AvlMap::new();
/// for word in ["a", "b", "a"] {
///     *counts.entry(word).or_insert(0) += 1;
/// }
/// assert_eq!(counts.get(&"a"), Some(&2));
/// assert_eq!(counts.get(&"b"), Some(&1));
/// ```
pub enum Entry<'a, K, V, C = Less> {
    /// A vacant entry: the key is not in the map.
    Vacant(VacantEntry<'a, K, V, C>),
    /// An occupied entry: the key is in the map.
    Occupied(OccupiedEntry<'a, K, V, C>),
}

/// A view into a vacant entry of an [`AvlMap`](super::AvlMap). It is part of
/// the [`Entry`] enum.
pub struct VacantEntry<'a, K, V, C = Less> {
    pub(super) key: K,
    pub(super) tree: &'a mut RawAvlMap<K, V, C>,
}

/// A view into an occupied entry of an [`AvlMap`](super::AvlMap). It is part
/// of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, C = Less> {
    pub(super) node: Handle,
    pub(super) tree: &'a mut RawAvlMap<K, V, C>,
}

impl<'a, K, V, C: Compare<K>> Entry<'a, K, V, C> {
    /// Inserts `default` if the entry is vacant, then returns a mutable
    /// reference to the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.entry("poneyland").or_insert(12);
    /// assert_eq!(map.get(&"poneyland"), Some(&12));
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Self::Occupied(entry) => entry.into_mut(),
            Self::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant, then returns a
    /// mutable reference to the value.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Self::Occupied(entry) => entry.into_mut(),
            Self::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Inserts the result of `default`, computed from the key, if the entry
    /// is vacant, then returns a mutable reference to the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// map.entry("poneyland").or_insert_with_key(|key| key.len());
    /// assert_eq!(map.get(&"poneyland"), Some(&9));
    /// ```
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Self::Occupied(entry) => entry.into_mut(),
            Self::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Returns a reference to this entry's key.
    #[must_use]
    pub fn key(&self) -> &K {
        match self {
            Self::Occupied(entry) => entry.key(),
            Self::Vacant(entry) => entry.key(),
        }
    }

    /// Applies `f` to the value if the entry is occupied, then returns the
    /// entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert("poneyland", 42);
    /// map.entry("poneyland").and_modify(|v| *v += 1).or_insert(0);
    /// assert_eq!(map.get(&"poneyland"), Some(&43));
    /// ```
    #[must_use]
    pub fn and_modify<F: FnOnce(&mut V)>(self, f: F) -> Self {
        match self {
            Self::Occupied(mut entry) => {
                f(entry.get_mut());
                Self::Occupied(entry)
            }
            Self::Vacant(entry) => Self::Vacant(entry),
        }
    }
}

impl<'a, K, V: Default, C: Compare<K>> Entry<'a, K, V, C> {
    /// Inserts the default value if the entry is vacant, then returns a
    /// mutable reference to the value.
    ///
    /// This gives the read-or-create behavior of indexing into a mutable
    /// `std::map`: looking at a missing key materializes it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::AvlMap;
    ///
    /// let mut map: AvlMap<i32, u32> = AvlMap::new();
    /// map.entry(5).or_default();
    /// assert_eq!(map.get(&5), Some(&0));
    /// ```
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> {
    /// Returns a reference to the key that would be used on insertion.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    #[must_use]
    pub fn into_key(self) -> K {
        self.key
    }
}

impl<'a, K, V, C: Compare<K>> VacantEntry<'a, K, V, C> {
    /// Inserts the entry's key with `value` and returns a mutable reference
    /// to the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::{AvlMap, Entry};
    ///
    /// let mut map = AvlMap::new();
    /// if let Entry::Vacant(entry) = map.entry("poneyland") {
    ///     entry.insert(37);
    /// }
    /// assert_eq!(map.get(&"poneyland"), Some(&37));
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let tree = self.tree;
        let (node, _) = tree.insert(self.key, value);
        tree.value_mut(node)
    }
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    /// Returns a reference to this entry's key.
    #[must_use]
    pub fn key(&self) -> &K {
        self.tree.key(self.node)
    }

    /// Returns a reference to this entry's value.
    #[must_use]
    pub fn get(&self) -> &V {
        self.tree.value(self.node)
    }

    /// Returns a mutable reference to this entry's value, borrowed from the
    /// entry. Use [`into_mut`](Self::into_mut) to borrow from the map itself.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.value_mut(self.node)
    }

    /// Consumes the entry, returning a mutable reference to the value with
    /// the map's lifetime.
    #[must_use]
    pub fn into_mut(self) -> &'a mut V {
        self.tree.value_mut(self.node)
    }

    /// Replaces this entry's value with `value`, returning the old value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::{AvlMap, Entry};
    ///
    /// let mut map = AvlMap::new();
    /// map.insert("poneyland", 12);
    /// if let Entry::Occupied(mut entry) = map.entry("poneyland") {
    ///     assert_eq!(entry.insert(15), 12);
    /// }
    /// assert_eq!(map.get(&"poneyland"), Some(&15));
    /// ```
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the map, returning the value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry from the map, returning the stored key and value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use larch_tree::{AvlMap, Entry};
    ///
    /// let mut map = AvlMap::new();
    /// map.insert("poneyland", 12);
    /// if let Entry::Occupied(entry) = map.entry("poneyland") {
    ///     assert_eq!(entry.remove_entry(), ("poneyland", 12));
    /// }
    /// assert!(!map.contains_key(&"poneyland"));
    /// ```
    pub fn remove_entry(self) -> (K, V) {
        self.tree.remove_at(self.node)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Entry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacant(entry) => f.debug_tuple("Entry").field(entry).finish(),
            Self::Occupied(entry) => f.debug_tuple("Entry").field(entry).finish(),
        }
    }
}

impl<K: fmt::Debug, V, C> fmt::Debug for VacantEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VacantEntry").field(self.key()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OccupiedEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish()
    }
}
