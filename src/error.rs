use thiserror::Error;

/// Error returned by [`AvlMap::at`] and [`AvlMap::at_mut`] when the requested
/// key is absent.
///
/// This is the only recoverable failure the map surfaces: the lookup performs
/// no mutation, so the map is left exactly as it was and the caller may retry
/// with another key or fall back to an inserting accessor such as
/// [`AvlMap::entry`].
///
/// [`AvlMap::at`]: crate::AvlMap::at
/// [`AvlMap::at_mut`]: crate::AvlMap::at_mut
/// [`AvlMap::entry`]: crate::AvlMap::entry
///
/// # Examples
///
/// ```
/// use larch_tree::{AvlMap, OutOfRange};
///
/// let map: AvlMap<i32, &str> = AvlMap::from([(1, "a")]);
/// assert_eq!(map.at(&1), Ok(&"a"));
/// assert_eq!(map.at(&2), Err(OutOfRange));
/// ```
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no entry found for key")]
pub struct OutOfRange;
