use log::trace;

use super::Buffer;
use crate::error::InsertError;

/// A bounded FIFO over a fixed ring of slots.
///
/// The read position wraps to the start of the slot array instead of
/// shifting elements, so push and pop are O(1). `try_push` fails with
/// [`InsertError::Full`] once every slot is occupied.
#[derive(Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    start: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Capacity is fixed for the life of the buffer. Zero rounds up to
    /// one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        RingBuffer {
            slots,
            start: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Physical slot of the element `offset` places past the read
    /// position, wrapping past the end of the array.
    fn slot(&self, offset: usize) -> usize {
        (self.start + offset) % self.slots.len()
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.start = 0;
        self.len = 0;
    }

    /// Iterates oldest to newest without consuming.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).map(move |offset| {
            self.slots[self.slot(offset)]
                .as_ref()
                .expect("live span slot is occupied")
        })
    }
}

impl<T> Buffer<T> for RingBuffer<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn try_push(&mut self, value: T) -> Result<(), InsertError<T>> {
        if self.is_full() {
            return Err(InsertError::Full {
                value,
                capacity: self.slots.len(),
            });
        }
        let at = self.slot(self.len);
        self.slots[at] = Some(value);
        self.len += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.start].take();
        self.start = (self.start + 1) % self.slots.len();
        self.len -= 1;
        value
    }

    fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            self.slots[self.start].as_ref()
        }
    }
}

/// A FIFO ring that displaces its oldest element instead of refusing
/// new ones.
#[derive(Debug)]
pub struct CircularBuffer<T> {
    ring: RingBuffer<T>,
}

impl<T> CircularBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        CircularBuffer {
            ring: RingBuffer::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Inserts, returning the element displaced to make room, if any.
    pub fn push(&mut self, value: T) -> Option<T> {
        let displaced = if self.ring.is_full() {
            trace!("displacing eldest element");
            self.ring.pop()
        } else {
            None
        };
        match self.ring.try_push(value) {
            Ok(()) => displaced,
            Err(_) => unreachable!("ring has a free slot after displacement"),
        }
    }

    pub fn clear(&mut self) {
        self.ring.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.ring.iter()
    }
}

impl<T> Buffer<T> for CircularBuffer<T> {
    fn len(&self) -> usize {
        self.ring.len()
    }

    fn try_push(&mut self, value: T) -> Result<(), InsertError<T>> {
        self.push(value);
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        self.ring.pop()
    }

    fn peek(&self) -> Option<&T> {
        self.ring.peek()
    }
}
