//! A minimal LIFO stack, used as scratch space by the diagnostic dump.

/// A last-in first-out stack over a growable buffer.
///
/// Only LIFO order is guaranteed; there is no way to observe anything but
/// the most recently pushed element.
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack. No memory is allocated until the first push.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Pushes an element on top of the stack.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the most recently pushed element,
    /// or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns true if the stack holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of elements on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
