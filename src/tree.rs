use std::fmt;
use std::io::{self, Write};
use std::iter::FromIterator;
use std::ptr::NonNull;

use crate::cursor::{Cursor, Iter};
use crate::error::Underflow;
use crate::node::{height_of, Node, NodePtr, Subtree};
use crate::stack::Stack;

/// An ordered set of `i64` values implemented with an AVL tree whose nodes
/// are threaded into a sorted doubly-linked list.
///
/// The tree gives O(log n) search, insertion and removal; the list gives
/// O(1) steps between neighboring values in either direction, independent
/// of tree shape. Two permanent sentinel nodes bracket the list.
///
/// ```
/// use linked_avl::LinkedAvlTree;
///
/// let mut tree = LinkedAvlTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
/// assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 2, 3]);
/// assert_eq!(tree.find(2).value(), Some(2));
/// tree.remove(2);
/// assert!(!tree.contains(2));
/// ```
pub struct LinkedAvlTree {
    root: Subtree,
    len: usize,
    // The sentinels live as long as the tree and never enter the BST;
    // their value field is a dummy and never read.
    front_sentinel: Box<Node>,
    back_sentinel: Box<Node>,
}

impl LinkedAvlTree {
    /// Creates an empty tree. The two boundary sentinels are the only
    /// allocations until the first value is inserted.
    pub fn new() -> Self {
        let mut tree = Self {
            root: None,
            len: 0,
            front_sentinel: Node::new_boxed(0),
            back_sentinel: Node::new_boxed(0),
        };
        tree.reanchor_sentinels();
        tree
    }

    /// Returns true if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Height of the tree: -1 when empty, 0 for a single node.
    pub fn height(&self) -> i32 {
        height_of(&self.root)
    }

    /// Returns the smallest value, or an [`Underflow`] error when empty.
    pub fn front(&self) -> Result<i64, Underflow> {
        match self.root.as_deref() {
            Some(root) => Ok(root.front().value),
            None => Err(Underflow::new("front")),
        }
    }

    /// Returns the largest value, or an [`Underflow`] error when empty.
    pub fn back(&self) -> Result<i64, Underflow> {
        match self.root.as_deref() {
            Some(root) => Ok(root.back().value),
            None => Err(Underflow::new("back")),
        }
    }

    /// Returns true if the tree contains `value`.
    pub fn contains(&self, value: i64) -> bool {
        self.root
            .as_deref()
            .and_then(|root| root.find(value))
            .is_some()
    }

    /// Returns a cursor at `value`, or [`end`](Self::end) if absent.
    pub fn find(&self, value: i64) -> Cursor<'_> {
        match self.root.as_deref().and_then(|root| root.find(value)) {
            Some(node) => Cursor::new(self, NonNull::from(node)),
            None => self.end(),
        }
    }

    /// Cursor at the smallest value; equals [`end`](Self::end) when empty.
    pub fn begin(&self) -> Cursor<'_> {
        match self.root.as_deref() {
            Some(root) => Cursor::new(self, NonNull::from(root.front())),
            None => self.end(),
        }
    }

    /// Cursor at the back boundary, one past the largest value.
    pub fn end(&self) -> Cursor<'_> {
        Cursor::new(self, self.back_boundary())
    }

    /// Cursor at the largest value; equals [`rend`](Self::rend) when empty.
    pub fn rbegin(&self) -> Cursor<'_> {
        match self.root.as_deref() {
            Some(root) => Cursor::new(self, NonNull::from(root.back())),
            None => self.rend(),
        }
    }

    /// Cursor at the front boundary, one before the smallest value.
    pub fn rend(&self) -> Cursor<'_> {
        Cursor::new(self, self.front_boundary())
    }

    /// Returns an iterator over the values in ascending order.
    /// Reversing it yields descending order.
    pub fn iter(&self) -> Iter<'_> {
        let next = self.front_sentinel.next.unwrap_or(self.back_boundary());
        let next_back = self.back_sentinel.prev.unwrap_or(self.front_boundary());
        Iter::new(next, next_back, self.len)
    }

    /// Inserts a value. Returns false and changes nothing for a duplicate.
    pub fn insert(&mut self, value: i64) -> bool {
        let inserted = match self.root.take() {
            None => {
                self.root = Some(Node::new_boxed(value));
                true
            }
            Some(root) => {
                let (root, inserted) = Node::insert(root, value);
                self.root = Some(root);
                inserted
            }
        };
        if inserted {
            self.len += 1;
            self.reanchor_sentinels();
        }
        inserted
    }

    /// Removes a value. Returns whether it was present.
    pub fn remove(&mut self, value: i64) -> bool {
        let removed = match self.root.take() {
            None => false,
            Some(root) => {
                let (root, removed) = Node::remove(root, value);
                self.root = root;
                removed
            }
        };
        if removed {
            debug_assert!(self.len >= 1);
            self.len -= 1;
            self.reanchor_sentinels();
            debug_assert!(!self.contains(value));
        }
        removed
    }

    /// Removes every value and relinks the sentinels to each other.
    pub fn clear(&mut self) {
        // Dropping the root drops the whole tree children-first; the AVL
        // height bound keeps the drop recursion shallow.
        self.root = None;
        self.len = 0;
        self.reanchor_sentinels();
    }

    /// Writes the tree pre-order with cached heights, one node as
    /// `[value, height]`:
    ///
    /// ```text
    /// START->[2, 1]->[1, 0]->[3, 0]->END
    /// ```
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "START->")?;
        let mut stack: Stack<&Node> = Stack::new();
        if let Some(root) = self.root.as_deref() {
            stack.push(root);
        }
        while let Some(node) = stack.pop() {
            write!(out, "[{}, {}]->", node.value, node.height)?;
            // Right first so the left subtree is popped (and printed) first.
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
        }
        writeln!(out, "END")
    }

    pub(crate) fn front_boundary(&self) -> NodePtr {
        NonNull::from(&*self.front_sentinel)
    }

    pub(crate) fn back_boundary(&self) -> NodePtr {
        NonNull::from(&*self.back_sentinel)
    }

    /// Points the sentinels at the current global minimum and maximum (or
    /// at each other when empty). Called after every successful mutation;
    /// the leftmost/rightmost descent keeps this O(log n).
    fn reanchor_sentinels(&mut self) {
        let front_ptr = NonNull::from(&mut *self.front_sentinel);
        let back_ptr = NonNull::from(&mut *self.back_sentinel);
        if let Some(root) = self.root.as_deref_mut() {
            let mut first = NonNull::from(root.front_mut());
            let mut last = NonNull::from(root.back_mut());
            unsafe {
                first.as_mut().prev = Some(front_ptr);
                last.as_mut().next = Some(back_ptr);
            }
            self.front_sentinel.next = Some(first);
            self.back_sentinel.prev = Some(last);
        } else {
            self.front_sentinel.next = Some(back_ptr);
            self.back_sentinel.prev = Some(front_ptr);
        }
    }

    /// Asserts every structural invariant: AVL balance, cached heights,
    /// BST order, list/tree agreement in both directions, and the length.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        // Tree side: order bounds, heights, balance, node count.
        fn check_node(node: &Node, lower: Option<i64>, upper: Option<i64>) -> (i32, usize) {
            if let Some(lower) = lower {
                assert!(node.value > lower);
            }
            if let Some(upper) = upper {
                assert!(node.value < upper);
            }
            let (left_height, left_count) = node
                .left
                .as_deref()
                .map_or((-1, 0), |left| check_node(left, lower, Some(node.value)));
            let (right_height, right_count) = node
                .right
                .as_deref()
                .map_or((-1, 0), |right| check_node(right, Some(node.value), upper));
            assert_eq!(node.height, 1 + left_height.max(right_height));
            assert!((left_height - right_height).abs() <= 1);
            (node.height, 1 + left_count + right_count)
        }
        let (_, count) = self
            .root
            .as_deref()
            .map_or((-1, 0), |root| check_node(root, None, None));
        assert_eq!(count, self.len);

        // List side: sentinels terminate the chain, every prev mirrors the
        // next that led there, and the walk is exactly the in-order values.
        assert!(self.front_sentinel.prev.is_none());
        assert!(self.back_sentinel.next.is_none());
        let back = self.back_boundary();
        let mut forward = Vec::with_capacity(self.len);
        let mut prev_ptr = self.front_boundary();
        let mut current = self.front_sentinel.next;
        while let Some(ptr) = current {
            if ptr == back {
                break;
            }
            let node = unsafe { ptr.as_ref() };
            assert_eq!(node.prev, Some(prev_ptr));
            forward.push(node.value);
            assert!(
                forward.len() <= self.len,
                "list holds more nodes than the tree"
            );
            prev_ptr = ptr;
            current = node.next;
        }
        assert_eq!(current, Some(back), "list does not end at the back sentinel");
        assert_eq!(self.back_sentinel.prev, Some(prev_ptr));

        fn collect_inorder(node: &Node, out: &mut Vec<i64>) {
            if let Some(left) = node.left.as_deref() {
                collect_inorder(left, out);
            }
            out.push(node.value);
            if let Some(right) = node.right.as_deref() {
                collect_inorder(right, out);
            }
        }
        let mut inorder = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            collect_inorder(root, &mut inorder);
        }
        assert_eq!(forward, inorder);
        assert!(forward.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

impl Default for LinkedAvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LinkedAvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Clone for LinkedAvlTree {
    fn clone(&self) -> Self {
        self.iter().collect()
    }
}

impl PartialEq for LinkedAvlTree {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for LinkedAvlTree {}

impl FromIterator<i64> for LinkedAvlTree {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i64> for LinkedAvlTree {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a> IntoIterator for &'a LinkedAvlTree {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
