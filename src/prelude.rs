pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CoreMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::policy::deque_lru::DequeLruCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::linked_lru::LinkedLruCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::mru::MruCache;
pub use crate::policy::tree_lfu::TreeLfuCache;
pub use crate::traits::{CoreCache, LfuCacheTrait, VictimCache};
