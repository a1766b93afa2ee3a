use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Fail-fast gate for the translation client.
///
/// Closed: requests pass. After `threshold` consecutive failures the gate
/// opens and requests are rejected until `cooldown` elapses, at which point
/// requests pass again; the next success closes the gate, the next failure
/// re-opens it for another cooldown. The gate only rejects; it never
/// retries on the caller's behalf.
pub struct FailureGate {
    inner: Mutex<GateInner>,
    threshold: usize,
    cooldown: Duration,
}

struct GateInner {
    consecutive_failures: usize,
    open_since: Option<Instant>,
}

impl FailureGate {
    pub fn new(threshold: usize, cooldown: Duration) -> Self {
        Self {
            inner: Mutex::new(GateInner {
                consecutive_failures: 0,
                open_since: None,
            }),
            threshold,
            cooldown,
        }
    }

    /// Whether a request may proceed right now.
    pub fn allow_request(&self) -> bool {
        let inner = self.inner.lock();
        match inner.open_since {
            None => true,
            Some(opened) => opened.elapsed() >= self.cooldown,
        }
    }

    pub fn record_success(&self) {
        let mut inner = self.inner.lock();
        inner.consecutive_failures = 0;
        inner.open_since = None;
    }

    pub fn record_failure(&self) {
        let mut inner = self.inner.lock();
        inner.consecutive_failures += 1;
        if inner.consecutive_failures >= self.threshold {
            inner.open_since = Some(Instant::now());
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().open_since.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_opens_after_threshold_failures() {
        let gate = FailureGate::new(3, Duration::from_secs(60));

        gate.record_failure();
        gate.record_failure();
        assert!(gate.allow_request());

        gate.record_failure();
        assert!(gate.is_open());
        assert!(!gate.allow_request());
    }

    #[test]
    fn test_success_closes_the_gate() {
        let gate = FailureGate::new(1, Duration::from_millis(50));
        gate.record_failure();
        assert!(!gate.allow_request());

        std::thread::sleep(Duration::from_millis(80));
        assert!(gate.allow_request());

        gate.record_success();
        assert!(!gate.is_open());
        assert!(gate.allow_request());
    }

    #[test]
    fn test_failure_after_cooldown_reopens() {
        let gate = FailureGate::new(2, Duration::from_millis(50));
        gate.record_failure();
        gate.record_failure();
        assert!(!gate.allow_request());

        std::thread::sleep(Duration::from_millis(80));
        assert!(gate.allow_request());

        // The allowed request failed: back to rejecting for a fresh cooldown.
        gate.record_failure();
        assert!(!gate.allow_request());
    }

    #[test]
    fn test_success_resets_failure_streak() {
        let gate = FailureGate::new(3, Duration::from_secs(60));
        gate.record_failure();
        gate.record_failure();
        gate.record_success();
        gate.record_failure();
        gate.record_failure();
        assert!(gate.allow_request());
    }
}
