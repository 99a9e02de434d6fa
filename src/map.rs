//! Map variants: insertion-ordered, LRU, per-bucket concurrent,
//! multi-valued, bidirectional, small-map, lazy, and copy-on-write.

mod bidi;
mod bucket;
mod cow;
mod flat;
mod lazy;
mod linked;
mod lru;
mod multi;

pub use bidi::BidiMap;
pub use bucket::{AtomicView, BucketMap};
pub use cow::CowMap;
pub use flat::Flat3Map;
pub use lazy::LazyMap;
pub use linked::{LinkedMap, OrderedIter};
pub use lru::LruMap;
pub use multi::MultiMap;
