use std::cmp::{self, Ordering};
use std::ptr::NonNull;

pub(crate) type NodePtr = NonNull<Node>;
pub(crate) type Subtree = Option<Box<Node>>;

/// A tree node that is also a link in the sorted list.
///
/// `left` and `right` own the subtrees; `prev` and `next` are non-owning
/// pointers to the in-order neighbors, which may be the tree's sentinels.
pub(crate) struct Node {
    pub(crate) value: i64,
    pub(crate) height: i32,
    pub(crate) left: Subtree,
    pub(crate) right: Subtree,
    pub(crate) prev: Option<NodePtr>,
    pub(crate) next: Option<NodePtr>,
}

/// Height of an optional subtree: -1 for an absent subtree, so a leaf
/// has height 0. Total over "no node"; never a method on a missing receiver.
pub(crate) fn height_of(subtree: &Subtree) -> i32 {
    subtree.as_deref().map_or(-1, |node| node.height)
}

impl Node {
    pub(crate) fn new_boxed(value: i64) -> Box<Node> {
        Box::new(Node {
            value,
            height: 0,
            left: None,
            right: None,
            prev: None,
            next: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + cmp::max(height_of(&self.left), height_of(&self.right));
    }

    pub(crate) fn balance_factor(&self) -> i32 {
        height_of(&self.left) - height_of(&self.right)
    }

    /// Leftmost node of this subtree.
    pub(crate) fn front(&self) -> &Node {
        match self.left.as_deref() {
            Some(left) => left.front(),
            None => self,
        }
    }

    /// Rightmost node of this subtree.
    pub(crate) fn back(&self) -> &Node {
        match self.right.as_deref() {
            Some(right) => right.back(),
            None => self,
        }
    }

    pub(crate) fn front_mut(&mut self) -> &mut Node {
        if self.left.is_some() {
            self.left.as_deref_mut().unwrap().front_mut()
        } else {
            self
        }
    }

    pub(crate) fn back_mut(&mut self) -> &mut Node {
        if self.right.is_some() {
            self.right.as_deref_mut().unwrap().back_mut()
        } else {
            self
        }
    }

    pub(crate) fn find(&self, value: i64) -> Option<&Node> {
        match value.cmp(&self.value) {
            Ordering::Equal => Some(self),
            Ordering::Less => self.left.as_deref().and_then(|left| left.find(value)),
            Ordering::Greater => self.right.as_deref().and_then(|right| right.find(value)),
        }
    }

    /// Recursive insertion. Takes the subtree root by value and returns the
    /// (possibly rotated) new root; the caller overwrites its child slot
    /// with it. Returns false without changing anything for a duplicate.
    ///
    /// A new node always lands in an empty child slot, so its in-order
    /// neighbor is the parent itself: a left child is spliced into the list
    /// directly before the parent, a right child directly after.
    pub(crate) fn insert(mut node: Box<Node>, value: i64) -> (Box<Node>, bool) {
        let inserted = match value.cmp(&node.value) {
            Ordering::Less => match node.left.take() {
                None => {
                    let mut new_node = Node::new_boxed(value);
                    unsafe { new_node.link_before(NonNull::from(&mut *node)) };
                    node.left = Some(new_node);
                    true
                }
                Some(left) => {
                    let (left, inserted) = Self::insert(left, value);
                    node.left = Some(left);
                    inserted
                }
            },
            Ordering::Greater => match node.right.take() {
                None => {
                    let mut new_node = Node::new_boxed(value);
                    unsafe { new_node.link_after(NonNull::from(&mut *node)) };
                    node.right = Some(new_node);
                    true
                }
                Some(right) => {
                    let (right, inserted) = Self::insert(right, value);
                    node.right = Some(right);
                    inserted
                }
            },
            Ordering::Equal => false,
        };
        if inserted {
            node = Self::rebalance(node);
        }
        (node, inserted)
    }

    /// Recursive removal, own-and-return like [`Node::insert`]. The subtree
    /// may become empty, hence the `Subtree` return.
    pub(crate) fn remove(mut node: Box<Node>, value: i64) -> (Subtree, bool) {
        match value.cmp(&node.value) {
            Ordering::Less => {
                let removed = match node.left.take() {
                    None => false,
                    Some(left) => {
                        let (left, removed) = Self::remove(left, value);
                        node.left = left;
                        removed
                    }
                };
                if removed {
                    node = Self::rebalance(node);
                }
                (Some(node), removed)
            }
            Ordering::Greater => {
                let removed = match node.right.take() {
                    None => false,
                    Some(right) => {
                        let (right, removed) = Self::remove(right, value);
                        node.right = right;
                        removed
                    }
                };
                if removed {
                    node = Self::rebalance(node);
                }
                (Some(node), removed)
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (Some(left), Some(right)) => {
                    // Two children: absorb the in-order successor's value
                    // and remove that value from the right subtree instead.
                    // This node keeps its place in the list; only the
                    // successor node gets unlinked.
                    let successor = right.front().value;
                    node.value = successor;
                    let (right, _) = Self::remove(right, successor);
                    node.left = Some(left);
                    node.right = right;
                    node = Self::rebalance(node);
                    (Some(node), true)
                }
                (child, None) | (None, child) => {
                    // Leaf or single child: splice the list neighbors
                    // together and let the child (if any) take this slot.
                    unsafe { node.unlink() };
                    (child, true)
                }
            },
        }
    }

    /// Restores the AVL condition at this node and refreshes its height.
    /// At most one rotation shape is applied per call; the recursive
    /// insert/remove path rebalances each ancestor on the way back up.
    fn rebalance(mut node: Box<Node>) -> Box<Node> {
        let diff = node.balance_factor();
        if diff > 1 {
            // A left child with balance factor 0 (possible after a removal)
            // takes the single rotation; only a right-heavy left child
            // needs the preparatory left rotation.
            if node.left.as_deref().map_or(0, Node::balance_factor) < 0 {
                let left = node.left.take().unwrap();
                node.left = Some(Self::rotate_left(left));
            }
            Self::rotate_right(node)
        } else if diff < -1 {
            if node.right.as_deref().map_or(0, Node::balance_factor) > 0 {
                let right = node.right.take().unwrap();
                node.right = Some(Self::rotate_right(right));
            }
            Self::rotate_left(node)
        } else {
            node.update_height();
            node
        }
    }

    /// Single right rotation: pulls the left child up to be the new subtree
    /// root. Heights are recomputed bottom-up. List links are untouched,
    /// rotations only rearrange tree shape.
    fn rotate_right(mut node: Box<Node>) -> Box<Node> {
        let mut pivot = node.left.take().unwrap();
        node.left = pivot.right.take();
        node.update_height();
        pivot.right = Some(node);
        pivot.update_height();
        pivot
    }

    /// Single left rotation, mirror of [`Node::rotate_right`].
    fn rotate_left(mut node: Box<Node>) -> Box<Node> {
        let mut pivot = node.right.take().unwrap();
        node.right = pivot.left.take();
        node.update_height();
        pivot.left = Some(node);
        pivot.update_height();
        pivot
    }

    /// Splices `self` into the list directly before `at`.
    ///
    /// Safety: `at` and its current `prev` must be live nodes of the same
    /// tree with no outstanding references other than the pointers used here.
    unsafe fn link_before(&mut self, mut at: NodePtr) {
        let self_ptr = NonNull::from(&mut *self);
        self.next = Some(at);
        self.prev = at.as_ref().prev;
        if let Some(mut prev) = at.as_ref().prev {
            prev.as_mut().next = Some(self_ptr);
        }
        at.as_mut().prev = Some(self_ptr);
    }

    /// Splices `self` into the list directly after `at`.
    ///
    /// Safety: as for [`Node::link_before`].
    unsafe fn link_after(&mut self, mut at: NodePtr) {
        let self_ptr = NonNull::from(&mut *self);
        self.prev = Some(at);
        self.next = at.as_ref().next;
        if let Some(mut next) = at.as_ref().next {
            next.as_mut().prev = Some(self_ptr);
        }
        at.as_mut().next = Some(self_ptr);
    }

    /// Splices this node's list neighbors together and clears its own links.
    ///
    /// Safety: the neighbors must be live nodes of the same tree with no
    /// outstanding references other than the pointers used here.
    unsafe fn unlink(&mut self) {
        if let Some(mut prev) = self.prev {
            prev.as_mut().next = self.next;
        }
        if let Some(mut next) = self.next {
            next.as_mut().prev = self.prev;
        }
        self.prev = None;
        self.next = None;
    }
}
