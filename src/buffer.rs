//! Collections with a defined removal order.

mod blocking;
mod decorate;
mod priority;
mod ring;

pub use blocking::Blocking;
pub use decorate::{Predicated, Transformed};
pub use priority::PriorityBuffer;
pub use ring::{CircularBuffer, RingBuffer};

use crate::error::InsertError;

/// A collection with a defined removal order (FIFO, LIFO, priority).
///
/// `pop` removes the next element in that order; `peek` looks at it
/// without removing it. Decorators like [`Blocking`] and [`Predicated`]
/// compose over anything implementing this trait.
pub trait Buffer<T> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an element, handing it back when the buffer refuses it.
    fn try_push(&mut self, value: T) -> Result<(), InsertError<T>>;

    /// Removes and returns the next element in removal order.
    fn pop(&mut self) -> Option<T>;

    /// The element `pop` would return next.
    fn peek(&self) -> Option<&T>;
}
