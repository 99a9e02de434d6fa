//! Classical collection types: counted bags, ordering buffers, and a
//! family of maps (insertion-ordered, LRU, per-bucket concurrent,
//! multi-valued, bidirectional), plus single-method functor traits for
//! behavior passed as a value.
//!
//! Buffers share the [`Buffer`] trait — a collection with a defined
//! removal order — so the [`Blocking`], [`Predicated`], and
//! [`Transformed`] decorators compose over FIFO, LIFO, and priority
//! orders alike:
//!
//! ```
//! use satchel::{Blocking, Buffer, RingBuffer};
//!
//! let mut fifo = RingBuffer::new(2);
//! fifo.try_push(1).unwrap();
//! fifo.try_push(2).unwrap();
//! assert!(fifo.try_push(3).is_err());
//! assert_eq!(fifo.pop(), Some(1));
//!
//! let shared = Blocking::new(RingBuffer::new(16));
//! shared.push("job").unwrap();
//! assert_eq!(shared.pop(), Some("job"));
//! ```

pub mod bag;
pub mod buffer;
pub mod error;
pub mod functor;
pub mod map;
pub mod stack;

pub use bag::{Bag, HashBag, TreeBag};
pub use buffer::{
    Blocking, Buffer, CircularBuffer, Predicated, PriorityBuffer, RingBuffer, Transformed,
};
pub use error::InsertError;
pub use functor::{Closure, Factory, Predicate, Transformer};
pub use map::{
    AtomicView, BidiMap, BucketMap, CowMap, Flat3Map, LazyMap, LinkedMap, LruMap, MultiMap,
};
pub use stack::ArrayStack;
