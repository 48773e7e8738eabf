use alloc::vec::Vec;

use crate::compare::Compare;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// The core AVL tree implementation backing `AvlMap`.
///
/// Nodes (keys plus links) and values live in two separate arenas; a node
/// stores the handle of its value's slot. The split keeps mutable value
/// iteration free of aliasing with link navigation and keeps key searches
/// compact in memory.
///
/// Between any two operations the tree upholds:
/// - BST order: every key in a node's left subtree is `less` than the node's
///   key, every key in its right subtree is greater;
/// - balance: the heights of a node's two subtrees differ by at most 1;
/// - height: every cached height equals 1 + the larger child height, with an
///   absent child counting 0;
/// - uniqueness: no two stored keys compare equal.
pub(crate) struct RawAvlMap<K, V, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Arena storing all values (separate from nodes, see above).
    values: Arena<V>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    len: usize,
    /// The injected key order.
    comp: C,
}

impl<K, V, C> RawAvlMap<K, V, C> {
    /// Creates a new, empty tree using `comp` as the key order.
    pub(crate) const fn new(comp: C) -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            len: 0,
            comp,
        }
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize, comp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            comp,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Returns the injected key order.
    pub(crate) const fn comparator(&self) -> &C {
        &self.comp
    }

    /// Removes all entries. Dropping the arenas releases every node and value
    /// exactly once; the link structure needs no traversal.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the key stored at `handle`.
    pub(crate) fn key(&self, handle: Handle) -> &K {
        &self.nodes.get(handle).key
    }

    /// Returns the value stored at `handle`'s node.
    pub(crate) fn value(&self, handle: Handle) -> &V {
        self.values.get(self.nodes.get(handle).value)
    }

    /// Returns the value stored at `handle`'s node, mutably.
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        self.values.get_mut(self.nodes.get(handle).value)
    }

    /// Returns the key and value stored at `handle`'s node.
    pub(crate) fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (&node.key, self.values.get(node.value))
    }

    /// Returns a reference to a node by handle from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawAvlMap<K, V, C>`.
    pub(crate) unsafe fn node_ptr<'a>(ptr: *const Self, handle: Handle) -> &'a Node<K> {
        // SAFETY: We only access the `nodes` field through addr_of, avoiding
        // aliasing with the `values` field.
        unsafe { Arena::get_ptr(core::ptr::addr_of!((*ptr).nodes), handle) }
    }

    /// Returns a mutable reference to the value of `handle`'s node from a raw
    /// pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawAvlMap<K, V, C>`.
    /// - The caller must have logical exclusive access to the value slot; no
    ///   other live reference to it may exist.
    pub(crate) unsafe fn value_mut_ptr<'a>(ptr: *mut Self, handle: Handle) -> &'a mut V {
        // SAFETY: The node read touches only the `nodes` arena and the value
        // access only the `values` arena, so the two never alias.
        unsafe {
            let value = Self::node_ptr(ptr, handle).value;
            Arena::get_mut_ptr(core::ptr::addr_of_mut!((*ptr).values), value)
        }
    }

    /// Returns the leftmost (minimum) node of the subtree rooted at `node`.
    pub(crate) fn leftmost(&self, node: Handle) -> Handle {
        let mut current = node;
        while let Some(left) = self.nodes.get(current).left {
            current = left;
        }
        current
    }

    /// Returns the rightmost (maximum) node of the subtree rooted at `node`.
    pub(crate) fn rightmost(&self, node: Handle) -> Handle {
        let mut current = node;
        while let Some(right) = self.nodes.get(current).right {
            current = right;
        }
        current
    }

    /// Returns the minimum node of the tree, if any.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Returns the maximum node of the tree, if any.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Returns the in-order successor of `handle`, or `None` at the maximum.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        // SAFETY: `self` is a valid reference.
        unsafe { Self::successor_ptr(self, handle) }
    }

    /// Returns the in-order predecessor of `handle`, or `None` at the minimum.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        // SAFETY: `self` is a valid reference.
        unsafe { Self::predecessor_ptr(self, handle) }
    }

    /// `successor` through a raw pointer, for iterators that hold out mutable
    /// value references while navigating.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawAvlMap<K, V, C>`.
    pub(crate) unsafe fn successor_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        // SAFETY: Only the nodes arena is read; caller guarantees ptr is valid.
        unsafe {
            let node = Self::node_ptr(ptr, handle);

            // With a right subtree the successor is its leftmost node.
            if let Some(right) = node.right {
                let mut current = right;
                while let Some(left) = Self::node_ptr(ptr, current).left {
                    current = left;
                }
                return Some(current);
            }

            // Otherwise climb while we are a right child; the first ancestor
            // reached through a left-child link is the successor.
            let mut current = handle;
            let mut parent = node.parent;
            while let Some(p) = parent {
                let parent_node = Self::node_ptr(ptr, p);
                if parent_node.left == Some(current) {
                    return Some(p);
                }
                current = p;
                parent = parent_node.parent;
            }
            None
        }
    }

    /// `predecessor` through a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawAvlMap<K, V, C>`.
    pub(crate) unsafe fn predecessor_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        // SAFETY: Only the nodes arena is read; caller guarantees ptr is valid.
        unsafe {
            let node = Self::node_ptr(ptr, handle);

            if let Some(left) = node.left {
                let mut current = left;
                while let Some(right) = Self::node_ptr(ptr, current).right {
                    current = right;
                }
                return Some(current);
            }

            let mut current = handle;
            let mut parent = node.parent;
            while let Some(p) = parent {
                let parent_node = Self::node_ptr(ptr, p);
                if parent_node.right == Some(current) {
                    return Some(p);
                }
                current = p;
                parent = parent_node.parent;
            }
            None
        }
    }

    /// Drains all key-value pairs in sorted order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        debug_assert_eq!(self.len, self.nodes.len(), "size counter disagrees with live node slots");

        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.successor(handle);
        }

        let mut result = Vec::with_capacity(order.len());
        for handle in order {
            let node = self.nodes.take(handle);
            let value = self.values.take(node.value);
            result.push((node.key, value));
        }

        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
        result
    }

    /// Removes the node at `handle` and returns its pair.
    ///
    /// Leaves detach; a single child takes its parent's position; with two
    /// children the in-order successor node is unlinked from its own parent
    /// and spliced into the deleted position, inheriting parent, children,
    /// and height. The splice moves the successor node itself - no payload is
    /// copied - so handles to the successor stay meaningful.
    pub(crate) fn remove_at(&mut self, handle: Handle) -> (K, V) {
        let (parent, left, right, height) = {
            let node = self.nodes.get(handle);
            (node.parent, node.left, node.right, node.height)
        };

        let repair_from = match (left, right) {
            (None, None) => {
                self.relink(parent, handle, None);
                parent
            }
            (Some(child), None) | (None, Some(child)) => {
                self.nodes.get_mut(child).parent = parent;
                self.relink(parent, handle, Some(child));
                parent
            }
            (Some(left), Some(right)) => {
                let succ = self.leftmost(right);
                let repair_from = if succ == right {
                    // The successor is the deleted node's own right child; its
                    // right subtree stays in place.
                    Some(succ)
                } else {
                    // Unlink the successor from its own parent (it is always a
                    // left child there, with no left child of its own) and
                    // hand it the deleted node's right subtree.
                    let succ_node = self.nodes.get(succ);
                    let succ_parent =
                        succ_node.parent.expect("`remove_at()` - successor of an inner node has no parent!");
                    let succ_right = succ_node.right;

                    self.nodes.get_mut(succ_parent).left = succ_right;
                    if let Some(sr) = succ_right {
                        self.nodes.get_mut(sr).parent = Some(succ_parent);
                    }
                    self.nodes.get_mut(succ).right = Some(right);
                    self.nodes.get_mut(right).parent = Some(succ);
                    Some(succ_parent)
                };

                // The successor takes over position, left subtree, and height.
                self.nodes.get_mut(left).parent = Some(succ);
                {
                    let succ_node = self.nodes.get_mut(succ);
                    succ_node.left = Some(left);
                    succ_node.parent = parent;
                    succ_node.height = height;
                }
                self.relink(parent, handle, Some(succ));
                repair_from
            }
        };

        self.recount(repair_from);
        self.rebalance(repair_from);
        self.len -= 1;

        let node = self.nodes.take(handle);
        let value = self.values.take(node.value);
        (node.key, value)
    }

    /// Points `parent`'s link at `new` where it pointed at `old`, or moves the
    /// root pointer when there is no parent.
    fn relink(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => self.nodes.get_mut(p).replace_child(old, new),
        }
    }

    /// Returns the cached height of an optional subtree (0 when absent).
    fn height_of(&self, node: Option<Handle>) -> usize {
        node.map_or(0, |h| self.nodes.get(h).height)
    }

    /// Recomputes `node`'s height from its children.
    fn update_height(&mut self, node: Handle) {
        let (left, right) = {
            let n = self.nodes.get(node);
            (n.left, n.right)
        };
        let height = 1 + core::cmp::max(self.height_of(left), self.height_of(right));
        self.nodes.get_mut(node).height = height;
    }

    /// Recomputes heights bottom-up from `from` to the root. Must run
    /// bottom-up: an ancestor's height depends on its descendant's.
    fn recount(&mut self, mut from: Option<Handle>) {
        while let Some(handle) = from {
            self.update_height(handle);
            from = self.nodes.get(handle).parent;
        }
    }

    /// Restores the balance invariant on the path from `from` to the root.
    ///
    /// Every ancestor is visited: each rotation re-establishes balance at its
    /// own site, and refreshing heights while climbing keeps the ancestors'
    /// cached heights accurate, so fixing multiple sites in one pass is sound.
    fn rebalance(&mut self, mut from: Option<Handle>) {
        while let Some(handle) = from {
            self.update_height(handle);

            let (left, right) = {
                let n = self.nodes.get(handle);
                (n.left, n.right)
            };
            let left_height = self.height_of(left);
            let right_height = self.height_of(right);

            let subtree = if right_height > left_height + 1 {
                // Right-heavy: a left-heavy right child rotates right first
                // (double rotation), then the node rotates left.
                let pivot = right.expect("`rebalance()` - right-heavy node without right child!");
                let (pivot_left, pivot_right) = {
                    let p = self.nodes.get(pivot);
                    (p.left, p.right)
                };
                if self.height_of(pivot_left) > self.height_of(pivot_right) {
                    self.rotate_right(pivot);
                }
                self.rotate_left(handle)
            } else if left_height > right_height + 1 {
                let pivot = left.expect("`rebalance()` - left-heavy node without left child!");
                let (pivot_left, pivot_right) = {
                    let p = self.nodes.get(pivot);
                    (p.left, p.right)
                };
                if self.height_of(pivot_right) > self.height_of(pivot_left) {
                    self.rotate_left(pivot);
                }
                self.rotate_right(handle)
            } else {
                handle
            };

            from = self.nodes.get(subtree).parent;
        }
    }

    /// Rotates `node` left; its right child becomes the subtree root.
    /// Returns the new subtree root.
    fn rotate_left(&mut self, node: Handle) -> Handle {
        let pivot = self.nodes.get(node).right.expect("`rotate_left()` - node has no right child!");
        let inner = self.nodes.get(pivot).left;
        let parent = self.nodes.get(node).parent;

        self.nodes.get_mut(node).right = inner;
        if let Some(h) = inner {
            self.nodes.get_mut(h).parent = Some(node);
        }
        {
            let p = self.nodes.get_mut(pivot);
            p.parent = parent;
            p.left = Some(node);
        }
        self.nodes.get_mut(node).parent = Some(pivot);

        // Only the two rotated nodes change height; their subtrees below are
        // untouched.
        self.update_height(node);
        self.update_height(pivot);

        self.relink(parent, node, Some(pivot));
        pivot
    }

    /// Rotates `node` right; its left child becomes the subtree root.
    /// Returns the new subtree root.
    fn rotate_right(&mut self, node: Handle) -> Handle {
        let pivot = self.nodes.get(node).left.expect("`rotate_right()` - node has no left child!");
        let inner = self.nodes.get(pivot).right;
        let parent = self.nodes.get(node).parent;

        self.nodes.get_mut(node).left = inner;
        if let Some(h) = inner {
            self.nodes.get_mut(h).parent = Some(node);
        }
        {
            let p = self.nodes.get_mut(pivot);
            p.parent = parent;
            p.right = Some(node);
        }
        self.nodes.get_mut(node).parent = Some(pivot);

        self.update_height(node);
        self.update_height(pivot);

        self.relink(parent, node, Some(pivot));
        pivot
    }
}

impl<K, V, C: Compare<K>> RawAvlMap<K, V, C> {
    /// Searches for a key, descending with at most two `less` calls per
    /// level. Equality is "neither orders before the other"; keys never need
    /// an equality operation of their own.
    pub(crate) fn search(&self, key: &K) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if self.comp.less(key, &node.key) {
                current = node.left;
            } else if self.comp.less(&node.key, key) {
                current = node.right;
            } else {
                return Some(handle);
            }
        }
        None
    }

    /// Inserts a key-value pair, returning the node's handle and whether a
    /// new node was created.
    ///
    /// Insertion is idempotent: an equal key returns the existing node with
    /// `false` and performs no mutation at all - the supplied value is
    /// dropped, the stored one kept.
    pub(crate) fn insert(&mut self, key: K, value: V) -> (Handle, bool) {
        // Descend to the attachment point, remembering the side taken.
        let mut attach = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if self.comp.less(&key, &node.key) {
                attach = Some((handle, true));
                current = node.left;
            } else if self.comp.less(&node.key, &key) {
                attach = Some((handle, false));
                current = node.right;
            } else {
                return (handle, false);
            }
        }

        // Allocation happens before any link is touched, so an allocation
        // failure leaves the tree exactly as it was.
        let value = self.values.alloc(value);
        let child = self.nodes.alloc(Node::new(key, value));

        match attach {
            None => self.root = Some(child),
            Some((parent, went_left)) => {
                self.nodes.get_mut(child).parent = Some(parent);
                let parent_node = self.nodes.get_mut(parent);
                if went_left {
                    parent_node.left = Some(child);
                } else {
                    parent_node.right = Some(child);
                }
                self.recount(Some(parent));
                self.rebalance(Some(parent));
            }
        }

        self.len += 1;
        (child, true)
    }

    /// Removes a key, returning its pair if it was present.
    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let handle = self.search(key)?;
        Some(self.remove_at(handle))
    }

    /// Returns the first node whose key is not less than `key`: the walk
    /// remembers the most recent node it went left from.
    pub(crate) fn lower(&self, key: &K) -> Option<Handle> {
        let mut current = self.root;
        let mut candidate = None;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if self.comp.less(key, &node.key) {
                candidate = Some(handle);
                current = node.left;
            } else if self.comp.less(&node.key, key) {
                current = node.right;
            } else {
                return Some(handle);
            }
        }
        candidate
    }

    /// Returns the first node whose key is strictly greater than `key`: the
    /// same walk as [`lower`](Self::lower), but equality descends right and
    /// never records a candidate.
    pub(crate) fn higher(&self, key: &K) -> Option<Handle> {
        let mut current = self.root;
        let mut candidate = None;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if self.comp.less(key, &node.key) {
                candidate = Some(handle);
                current = node.left;
            } else {
                current = node.right;
            }
        }
        candidate
    }
}
