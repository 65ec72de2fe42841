//! Eviction engines.
//!
//! | Engine           | Victim                         | Touch cost |
//! |------------------|--------------------------------|------------|
//! | `LruCache`       | least recently touched         | O(1)       |
//! | `MruCache`       | most recently touched          | O(1)       |
//! | `LfuCache`       | lowest count, then oldest      | O(1)       |
//! | `LinkedLruCache` | least recently touched         | O(1)       |
//! | `DequeLruCache`  | least recently touched         | O(n)       |
//! | `TreeLfuCache`   | lowest count, then oldest      | O(log n)   |

pub mod deque_lru;
pub mod lfu;
pub mod linked_lru;
pub mod lru;
pub mod mru;
mod recency;
pub mod tree_lfu;
