//! Progress reporting.
//!
//! Long-running operations (dataset loading, search) notify a
//! [`ProgressSink`] at fixed checkpoints with a percentage in `0..=100`.
//! Sinks are write-only observers and must not block the caller.
//!
//! UIs that redraw on their own timer use [`ProgressCounter`]: the worker
//! stores into an atomic, the render loop reads the latest value.

use std::sync::atomic::{AtomicU8, Ordering};

/// Observer notified with a completion percentage.
pub trait ProgressSink {
    /// Called with a value in `0..=100`.
    fn report(&self, percent: u8);
}

/// Sink that drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _percent: u8) {}
}

impl<F> ProgressSink for F
where
    F: Fn(u8),
{
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// Latest-value progress cell shared between a worker and a UI thread.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    value: AtomicU8,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently reported percentage.
    pub fn get(&self) -> u8 {
        self.value.load(Ordering::Relaxed)
    }

    /// Reset to zero before handing the counter to a new operation.
    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

impl ProgressSink for ProgressCounter {
    fn report(&self, percent: u8) {
        self.value.store(percent.min(100), Ordering::Relaxed);
    }
}

/// Wraps a sink so it only ever sees non-decreasing values in `0..=100`.
pub(crate) struct Monotonic<'a, P: ProgressSink + ?Sized> {
    sink: &'a P,
    last: Option<u8>,
}

impl<'a, P: ProgressSink + ?Sized> Monotonic<'a, P> {
    pub(crate) fn new(sink: &'a P) -> Self {
        Self { sink, last: None }
    }

    pub(crate) fn report(&mut self, percent: u8) {
        let percent = percent.min(100);
        if self.last.is_some_and(|last| percent < last) {
            return;
        }
        self.last = Some(percent);
        self.sink.report(percent);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn closure_is_a_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |p: u8| seen.lock().unwrap().push(p);
        sink.report(10);
        sink.report(20);
        assert_eq!(*seen.lock().unwrap(), vec![10, 20]);
    }

    #[test]
    fn counter_keeps_latest_value() {
        let counter = Arc::new(ProgressCounter::new());
        counter.report(30);
        counter.report(60);
        assert_eq!(counter.get(), 60);
        counter.reset();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn counter_clamps_to_100() {
        let counter = ProgressCounter::new();
        counter.report(250);
        assert_eq!(counter.get(), 100);
    }

    #[test]
    fn monotonic_drops_regressions() {
        let seen = Mutex::new(Vec::new());
        let sink = |p: u8| seen.lock().unwrap().push(p);
        let mut tracker = Monotonic::new(&sink);
        for p in [0, 10, 5, 10, 30, 20, 100] {
            tracker.report(p);
        }
        assert_eq!(*seen.lock().unwrap(), vec![0, 10, 10, 30, 100]);
    }
}
