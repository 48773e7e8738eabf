use super::handle::Handle;

/// One tree vertex: a key, a handle to the value's slot, parent/child links,
/// and the cached height of the subtree rooted here.
///
/// Heights are at least 1 for any live node; an absent child contributes 0.
/// The key is immutable for the node's lifetime. The value slot lives in a
/// separate arena (mirroring the key/value split of the backing storage) so
/// iterators can hand out mutable value references while still reading keys
/// and links.
pub(crate) struct Node<K> {
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) height: usize,
    pub(crate) key: K,
    pub(crate) value: Handle,
}

impl<K> Node<K> {
    /// Creates a detached leaf node of height 1.
    pub(crate) const fn new(key: K, value: Handle) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            height: 1,
            key,
            value,
        }
    }

    /// Replaces whichever child link currently points at `old` with `new`.
    pub(crate) fn replace_child(&mut self, old: Handle, new: Option<Handle>) {
        if self.left == Some(old) {
            self.left = new;
        } else {
            debug_assert_eq!(self.right, Some(old), "`Node::replace_child()` - `old` is not a child!");
            self.right = new;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_detached_leaf() {
        let node = Node::new('k', Handle::from_index(0));
        assert_eq!(node.parent, None);
        assert_eq!(node.left, None);
        assert_eq!(node.right, None);
        assert_eq!(node.height, 1);
        assert_eq!(node.key, 'k');
    }

    #[test]
    fn replace_child_left_then_right() {
        let a = Handle::from_index(1);
        let b = Handle::from_index(2);
        let c = Handle::from_index(3);

        let mut node = Node::new(0u8, Handle::from_index(0));
        node.left = Some(a);
        node.right = Some(b);

        node.replace_child(a, Some(c));
        assert_eq!(node.left, Some(c));
        assert_eq!(node.right, Some(b));

        node.replace_child(b, None);
        assert_eq!(node.left, Some(c));
        assert_eq!(node.right, None);
    }
}
