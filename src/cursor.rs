use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::node::NodePtr;
use crate::tree::LinkedAvlTree;

/// A bidirectional cursor over the values of a [`LinkedAvlTree`].
///
/// A cursor walks the sorted list threaded through the tree, so moving it is
/// O(1) and independent of tree shape. It may rest on one of the tree's two
/// boundary sentinels; [`Cursor::value`] returns `None` there, and moving
/// past a boundary is a no-op.
///
/// This `struct` is created by the [`begin`], [`end`], [`rbegin`], [`rend`]
/// and [`find`] methods on [`LinkedAvlTree`].
///
/// [`begin`]: LinkedAvlTree::begin
/// [`end`]: LinkedAvlTree::end
/// [`rbegin`]: LinkedAvlTree::rbegin
/// [`rend`]: LinkedAvlTree::rend
/// [`find`]: LinkedAvlTree::find
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    tree: &'a LinkedAvlTree,
    node: NodePtr,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tree: &'a LinkedAvlTree, node: NodePtr) -> Self {
        Self { tree, node }
    }

    /// Returns the value the cursor rests on, or `None` at a boundary.
    pub fn value(&self) -> Option<i64> {
        if self.at_boundary() {
            None
        } else {
            Some(unsafe { self.node.as_ref() }.value)
        }
    }

    /// Returns true if the cursor rests on one of the boundary sentinels.
    pub fn at_boundary(&self) -> bool {
        self.node == self.tree.front_boundary() || self.node == self.tree.back_boundary()
    }

    /// Moves the cursor to the next value in ascending order.
    /// A no-op at the back boundary.
    pub fn move_next(&mut self) {
        if let Some(next) = unsafe { self.node.as_ref() }.next {
            self.node = next;
        }
    }

    /// Moves the cursor to the previous value in ascending order.
    /// A no-op at the front boundary.
    pub fn move_prev(&mut self) {
        if let Some(prev) = unsafe { self.node.as_ref() }.prev {
            self.node = prev;
        }
    }
}

/// Two cursors are equal iff they rest on the same node.
impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Cursor<'_> {}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.value()).finish()
    }
}

/// An iterator over the values of a [`LinkedAvlTree`] in ascending order.
///
/// Follows the threaded list, front to back; the reversed direction walks
/// back to front. This `struct` is created by the [`iter`] method on
/// [`LinkedAvlTree`].
///
/// [`iter`]: LinkedAvlTree::iter
#[derive(Clone)]
pub struct Iter<'a> {
    next: NodePtr,
    next_back: NodePtr,
    remaining: usize,
    _tree: PhantomData<&'a LinkedAvlTree>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(next: NodePtr, next_back: NodePtr, remaining: usize) -> Self {
        Self {
            next,
            next_back,
            remaining,
            _tree: PhantomData,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let node = unsafe { self.next.as_ref() };
        if let Some(next) = node.next {
            self.next = next;
        }
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let node = unsafe { self.next_back.as_ref() };
        if let Some(prev) = node.prev {
            self.next_back = prev;
        }
        self.remaining -= 1;
        Some(node.value)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
