use crate::metrics::snapshot::CoreMetricsSnapshot;
use crate::metrics::traits::CoreMetricsRecorder;

// ---------------------------------------------------------------------------
// CoreMetrics (LRU, MRU, LFU and the variants)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct CoreMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub clears: u64,
}

impl CoreMetrics {
    /// Copies the counters into a snapshot, adding the gauges given by the cache.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CoreMetricsSnapshot {
        CoreMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evict_calls: self.evict_calls,
            evicted_entries: self.evicted_entries,
            remove_calls: self.remove_calls,
            remove_found: self.remove_found,
            clears: self.clears,
            cache_len,
            capacity,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CoreMetricsRecorder for CoreMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }
    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_records_count_both_calls_and_outcome() {
        let mut metrics = CoreMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_get_miss();

        let snap = metrics.snapshot(1, 4);
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 2);
        assert_eq!(snap.cache_len, 1);
        assert_eq!(snap.capacity, 4);
    }

    #[test]
    fn reset_zeroes_counters() {
        let mut metrics = CoreMetrics::default();
        metrics.record_insert_call();
        metrics.record_insert_new();
        metrics.record_remove_call();
        metrics.reset();
        assert_eq!(metrics.insert_calls, 0);
        assert_eq!(metrics.insert_new, 0);
        assert_eq!(metrics.remove_calls, 0);
    }
}
