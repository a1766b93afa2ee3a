use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Stage counters for the pipeline.
///
/// Thread-safe and cheap to clone; the controller records outcomes as they
/// happen and a presentation or diagnostics layer can pull a snapshot.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    acquisitions: AtomicUsize,
    acquisitions_cancelled: AtomicUsize,
    acquisitions_failed: AtomicUsize,

    recognitions: AtomicUsize,
    recognitions_empty: AtomicUsize,
    recognitions_failed: AtomicUsize,

    translations: AtomicUsize,
    translations_failed: AtomicUsize,

    stale_completions: AtomicUsize,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                acquisitions: AtomicUsize::new(0),
                acquisitions_cancelled: AtomicUsize::new(0),
                acquisitions_failed: AtomicUsize::new(0),
                recognitions: AtomicUsize::new(0),
                recognitions_empty: AtomicUsize::new(0),
                recognitions_failed: AtomicUsize::new(0),
                translations: AtomicUsize::new(0),
                translations_failed: AtomicUsize::new(0),
                stale_completions: AtomicUsize::new(0),
                start_time: Instant::now(),
            }),
        }
    }

    pub fn record_acquisition(&self) {
        self.inner.acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_acquisition_cancelled(&self) {
        self.inner
            .acquisitions_cancelled
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_acquisition_failed(&self) {
        self.inner
            .acquisitions_failed
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_recognition(&self, empty: bool) {
        self.inner.recognitions.fetch_add(1, Ordering::Relaxed);
        if empty {
            self.inner.recognitions_empty.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_recognition_failed(&self) {
        self.inner
            .recognitions_failed
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_translation(&self) {
        self.inner.translations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_translation_failed(&self) {
        self.inner
            .translations_failed
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_completion(&self) {
        self.inner.stale_completions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = &self.inner;
        MetricsSnapshot {
            acquisitions: inner.acquisitions.load(Ordering::Relaxed),
            acquisitions_cancelled: inner.acquisitions_cancelled.load(Ordering::Relaxed),
            acquisitions_failed: inner.acquisitions_failed.load(Ordering::Relaxed),
            recognitions: inner.recognitions.load(Ordering::Relaxed),
            recognitions_empty: inner.recognitions_empty.load(Ordering::Relaxed),
            recognitions_failed: inner.recognitions_failed.load(Ordering::Relaxed),
            translations: inner.translations.load(Ordering::Relaxed),
            translations_failed: inner.translations_failed.load(Ordering::Relaxed),
            stale_completions: inner.stale_completions.load(Ordering::Relaxed),
            uptime_seconds: inner.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub acquisitions: usize,
    pub acquisitions_cancelled: usize,
    pub acquisitions_failed: usize,
    pub recognitions: usize,
    pub recognitions_empty: usize,
    pub recognitions_failed: usize,
    pub translations: usize,
    pub translations_failed: usize,
    pub stale_completions: usize,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = Metrics::new();
        metrics.record_acquisition();
        metrics.record_acquisition();
        metrics.record_acquisition_cancelled();
        metrics.record_recognition(false);
        metrics.record_recognition(true);
        metrics.record_translation();
        metrics.record_translation_failed();
        metrics.record_stale_completion();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.acquisitions, 2);
        assert_eq!(snapshot.acquisitions_cancelled, 1);
        assert_eq!(snapshot.recognitions, 2);
        assert_eq!(snapshot.recognitions_empty, 1);
        assert_eq!(snapshot.translations, 1);
        assert_eq!(snapshot.translations_failed, 1);
        assert_eq!(snapshot.stale_completions, 1);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let clone = metrics.clone();
        clone.record_translation();
        assert_eq!(metrics.snapshot().translations, 1);
    }
}
