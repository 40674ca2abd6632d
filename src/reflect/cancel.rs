//! Cancellation latch shared between a signal producer and reflect channels.

use std::sync::{Arc, OnceLock};

use crate::domain::Signal;

/// A latch that trips once and stays tripped.
///
/// Clones share state. A producer, typically a signal handler, calls
/// `trip`; consumers read `tripped` without consuming anything, so every
/// observer sees the same signal from then on.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    tripped: Arc<OnceLock<Signal>>,
}

impl CancelToken {
    /// A new armed latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the latch. Only the first signal is kept.
    ///
    /// Returns true if this call tripped it.
    pub fn trip(&self, signal: Signal) -> bool {
        self.tripped.set(signal).is_ok()
    }

    /// The signal that tripped the latch, if any.
    pub fn tripped(&self) -> Option<Signal> {
        self.tripped.get().copied()
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_armed() {
        let token = CancelToken::new();
        assert!(!token.is_tripped());
        assert_eq!(token.tripped(), None);
    }

    #[test]
    fn test_first_trip_wins() {
        let token = CancelToken::new();
        assert!(token.trip(Signal::TERMINATE));
        assert!(!token.trip(Signal::INTERRUPT));

        assert_eq!(token.tripped(), Some(Signal::TERMINATE));
        // Reading never clears
        assert_eq!(token.tripped(), Some(Signal::TERMINATE));
    }

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let producer = token.clone();

        thread::spawn(move || {
            producer.trip(Signal::INTERRUPT);
        })
        .join()
        .unwrap();

        assert_eq!(token.tripped(), Some(Signal::INTERRUPT));
    }
}
