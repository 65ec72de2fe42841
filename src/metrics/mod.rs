//! Operation counters for the cache engines (cargo feature `metrics`).
//!
//! Each engine owns a [`CoreMetrics`](metrics_impl::CoreMetrics) and exposes a
//! [`CoreMetricsSnapshot`](snapshot::CoreMetricsSnapshot) through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
