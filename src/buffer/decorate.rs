use super::Buffer;
use crate::error::InsertError;
use crate::functor::{Predicate, Transformer};

/// Rejects inserts that fail a predicate.
///
/// Elements already inside the buffer are never re-checked.
pub struct Predicated<B, P> {
    inner: B,
    predicate: P,
}

impl<B, P> Predicated<B, P> {
    pub fn new(inner: B, predicate: P) -> Self {
        Predicated { inner, predicate }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<T, B: Buffer<T>, P: Predicate<T>> Buffer<T> for Predicated<B, P> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn try_push(&mut self, value: T) -> Result<(), InsertError<T>> {
        if self.predicate.evaluate(&value) {
            self.inner.try_push(value)
        } else {
            Err(InsertError::Rejected { value })
        }
    }

    fn pop(&mut self) -> Option<T> {
        self.inner.pop()
    }

    fn peek(&self) -> Option<&T> {
        self.inner.peek()
    }
}

/// Applies a transformer to every element on the way in.
pub struct Transformed<B, F> {
    inner: B,
    transformer: F,
}

impl<B, F> Transformed<B, F> {
    pub fn new(inner: B, transformer: F) -> Self {
        Transformed { inner, transformer }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<T, B: Buffer<T>, F: Transformer<T, T>> Buffer<T> for Transformed<B, F> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn try_push(&mut self, value: T) -> Result<(), InsertError<T>> {
        self.inner.try_push(self.transformer.transform(value))
    }

    fn pop(&mut self) -> Option<T> {
        self.inner.pop()
    }

    fn peek(&self) -> Option<&T> {
        self.inner.peek()
    }
}
