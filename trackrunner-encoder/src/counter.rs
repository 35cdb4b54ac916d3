//! Interrupt-shared tick counter

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Tick count plus enable flag
///
/// Every method takes `&self` so one counter can be shared between the
/// edge interrupt handler and the bus handler, typically as a `static`.
pub struct TickCounter {
    ticks: AtomicU32,
    enabled: AtomicBool,
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            enabled: AtomicBool::new(false),
        }
    }

    /// Interrupt entry point; counts only while enabled
    pub fn on_edge(&self) {
        if self.enabled.load(Ordering::Acquire) {
            self.ticks.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Reset to zero and start counting
    pub fn start(&self) {
        self.ticks.store(0, Ordering::Relaxed);
        self.enabled.store(true, Ordering::Release);
    }

    /// Stop counting; the count is kept
    pub fn stop(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_edges_ignored_until_started() {
        let counter = TickCounter::new();
        counter.on_edge();
        assert_eq!(counter.ticks(), 0);

        counter.start();
        counter.on_edge();
        counter.on_edge();
        assert_eq!(counter.ticks(), 2);
    }

    #[test]
    fn test_stop_retains_count() {
        let counter = TickCounter::new();
        counter.start();
        for _ in 0..7 {
            counter.on_edge();
        }
        counter.stop();
        counter.on_edge();
        assert_eq!(counter.ticks(), 7);
        assert!(!counter.is_enabled());
    }

    #[test]
    fn test_restart_resets() {
        let counter = TickCounter::new();
        counter.start();
        counter.on_edge();
        counter.stop();
        counter.start();
        assert_eq!(counter.ticks(), 0);
        assert!(counter.is_enabled());
    }

    #[test]
    fn test_concurrent_edges_all_counted() {
        let counter = Arc::new(TickCounter::new());
        counter.start();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.on_edge();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.ticks(), 4000);
    }
}
