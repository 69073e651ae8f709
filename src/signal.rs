use core::sync::atomic::{AtomicBool, Ordering};

/// Single pending "a new sample may be available" notification.
///
/// Raised from the timer interrupt, consumed by the main loop. Several raises
/// between two observations collapse into one: a trigger that arrives while
/// another is still pending is dropped without trace. This holds as long as
/// the loop turns over faster than the interrupt fires.
pub struct DataReadySignal {
    pending: AtomicBool,
}

impl DataReadySignal {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Interrupt context. Never blocks.
    pub fn signal(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Returns whether a signal was pending and clears it in the same
    /// atomic step, so a raise can neither be lost between the read and the
    /// clear nor be observed twice.
    pub fn observe_and_clear(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Default for DataReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        let signal = DataReadySignal::new();
        assert!(!signal.is_pending());
        assert!(!signal.observe_and_clear());
    }

    #[test]
    fn observe_twice_returns_true_then_false() {
        let signal = DataReadySignal::new();
        signal.signal();
        assert!(signal.observe_and_clear());
        assert!(!signal.observe_and_clear());
    }

    #[test]
    fn repeated_raises_collapse_to_one() {
        let signal = DataReadySignal::new();
        signal.signal();
        signal.signal();
        signal.signal();
        assert!(signal.observe_and_clear());
        assert!(!signal.observe_and_clear());
    }

    #[test]
    fn raise_from_another_thread_is_seen() {
        static SIGNAL: DataReadySignal = DataReadySignal::new();
        std::thread::spawn(|| SIGNAL.signal()).join().unwrap();
        assert!(SIGNAL.observe_and_clear());
        assert!(!SIGNAL.is_pending());
    }
}
