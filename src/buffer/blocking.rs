use std::marker::PhantomData;
use std::time::{Duration, Instant};

use log::trace;
use parking_lot::{Condvar, Mutex};

use super::Buffer;
use crate::error::InsertError;

/// Adds blocking semantics to any [`Buffer`].
///
/// Writers wait for space whenever the inner buffer reports itself
/// full; readers wait for elements. `close` stops accepting writes,
/// wakes every waiter, and lets readers drain what is left. The API
/// takes `&self`, so a `Blocking` is typically shared behind an `Arc`.
pub struct Blocking<T, B> {
    state: Mutex<State<B>>,
    /// Signaled when an element lands in the buffer.
    available: Condvar,
    /// Signaled when space frees up or the buffer closes.
    space: Condvar,
    _element: PhantomData<T>,
}

struct State<B> {
    buf: B,
    accepting: bool,
}

impl<T, B: Buffer<T>> Blocking<T, B> {
    pub fn new(buf: B) -> Self {
        Blocking {
            state: Mutex::new(State {
                buf,
                accepting: true,
            }),
            available: Condvar::new(),
            space: Condvar::new(),
            _element: PhantomData,
        }
    }

    /// Blocks until the element is accepted or the buffer closes.
    ///
    /// A `Rejected` insert returns immediately; waiting cannot fix it.
    pub fn push(&self, value: T) -> Result<(), InsertError<T>> {
        let mut state = self.state.lock();
        let mut value = value;
        loop {
            if !state.accepting {
                return Err(InsertError::Closed { value });
            }
            match state.buf.try_push(value) {
                Ok(()) => {
                    self.available.notify_one();
                    return Ok(());
                }
                Err(InsertError::Full {
                    value: returned, ..
                }) => {
                    value = returned;
                    trace!("push waiting for space");
                    self.space.wait(&mut state);
                    trace!("push woke");
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Like `push`, but gives up once `timeout` passes.
    pub fn push_timeout(&self, value: T, timeout: Duration) -> Result<(), InsertError<T>> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        let mut value = value;
        loop {
            if !state.accepting {
                return Err(InsertError::Closed { value });
            }
            match state.buf.try_push(value) {
                Ok(()) => {
                    self.available.notify_one();
                    return Ok(());
                }
                Err(InsertError::Full {
                    value: returned, ..
                }) => {
                    value = returned;
                    if self.space.wait_until(&mut state, deadline).timed_out() {
                        return Err(InsertError::TimedOut {
                            value,
                            after: timeout,
                        });
                    }
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Blocks until an element is available. `None` once the buffer is
    /// closed and drained.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(value) = state.buf.pop() {
                self.space.notify_one();
                return Some(value);
            }
            if !state.accepting {
                return None;
            }
            trace!("pop waiting for an element");
            self.available.wait(&mut state);
        }
    }

    /// Like `pop`, returning `None` when `timeout` passes first.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        loop {
            if let Some(value) = state.buf.pop() {
                self.space.notify_one();
                return Some(value);
            }
            if !state.accepting {
                return None;
            }
            if self.available.wait_until(&mut state, deadline).timed_out() {
                return None;
            }
        }
    }

    /// The element the next `pop` would take, cloned out of the lock.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.state.lock().buf.peek().cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        !self.state.lock().accepting
    }

    /// Stops accepting writes and wakes every waiter. A closed buffer
    /// cannot be reopened; readers drain the remaining elements.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.accepting = false;
        self.available.notify_all();
        self.space.notify_all();
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread::{sleep, spawn};
    use std::time::Duration;

    use super::*;
    use crate::buffer::RingBuffer;

    #[test]
    fn push_blocks_until_space() {
        let done = Arc::new(AtomicBool::new(false));
        {
            let done = done.clone();
            spawn(move || {
                sleep(Duration::from_secs(2));
                assert!(done.load(Ordering::SeqCst), "failed to terminate in time");
            });
        }

        let buffer = Arc::new(Blocking::new(RingBuffer::new(1)));
        buffer.push(1).unwrap();

        let reader = {
            let buffer = buffer.clone();
            spawn(move || {
                sleep(Duration::from_millis(50));
                buffer.pop()
            })
        };

        // Full; waits for the reader to free a slot.
        buffer.push(2).unwrap();
        assert_eq!(reader.join().unwrap(), Some(1));
        assert_eq!(buffer.pop(), Some(2));
        done.store(true, Ordering::SeqCst);
    }

    #[test]
    fn close_drains_then_ends() {
        let buffer = Blocking::new(RingBuffer::new(4));
        buffer.push('a').unwrap();
        buffer.push('b').unwrap();
        buffer.close();

        assert_eq!(
            buffer.push('c'),
            Err(InsertError::Closed { value: 'c' })
        );
        assert_eq!(buffer.pop(), Some('a'));
        assert_eq!(buffer.pop(), Some('b'));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn close_wakes_blocked_reader() {
        let buffer = Arc::new(Blocking::new(RingBuffer::<u8>::new(2)));
        let reader = {
            let buffer = buffer.clone();
            spawn(move || buffer.pop())
        };
        sleep(Duration::from_millis(50));
        buffer.close();
        assert_eq!(reader.join().unwrap(), None);
    }

    #[test]
    fn close_wakes_blocked_writer() {
        let buffer = Arc::new(Blocking::new(RingBuffer::new(1)));
        buffer.push(1).unwrap();
        let writer = {
            let buffer = buffer.clone();
            spawn(move || buffer.push(2))
        };
        sleep(Duration::from_millis(50));
        buffer.close();
        assert_eq!(writer.join().unwrap(), Err(InsertError::Closed { value: 2 }));
    }

    #[test]
    fn timeouts_hand_the_element_back() {
        let buffer = Blocking::new(RingBuffer::new(1));
        buffer.push(1).unwrap();
        match buffer.push_timeout(2, Duration::from_millis(10)) {
            Err(InsertError::TimedOut { value, .. }) => assert_eq!(value, 2),
            other => panic!("expected timeout, got {:?}", other),
        }
        assert_eq!(buffer.pop_timeout(Duration::from_millis(10)), Some(1));
        assert_eq!(buffer.pop_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn spsc_preserves_fifo_order() {
        let buffer = Arc::new(Blocking::new(RingBuffer::new(8)));

        let producer = {
            let buffer = buffer.clone();
            spawn(move || {
                for i in 0..1000u32 {
                    buffer.push(i).unwrap();
                }
                buffer.close();
            })
        };

        let mut received = Vec::new();
        while let Some(v) = buffer.pop() {
            received.push(v);
        }
        producer.join().unwrap();
        assert_eq!(received, (0..1000).collect::<Vec<_>>());
    }
}
