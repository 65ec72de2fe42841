pub mod entry;
pub mod frequency_buckets;
pub mod intrusive_list;
pub mod key_index;
pub mod slot_arena;

pub use entry::{Entry, EntryMeta};
pub use frequency_buckets::{FrequencyBuckets, DEFAULT_BUCKET_PREALLOC};
pub use intrusive_list::{IntrusiveList, ListArena, ListHandle, ListIter};
pub use key_index::KeyIndex;
pub use slot_arena::{SlotArena, SlotId};
