//! Focus generations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Per-screen counter of focus events.
///
/// Every focus-triggered load takes a [`FocusTicket`]; only the ticket of
/// the latest focus may apply its response.
#[derive(Debug, Clone, Default)]
pub struct FocusGenerations {
    latest: Arc<AtomicU64>,
}

impl FocusGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every earlier ticket.
    pub fn begin(&self) -> FocusTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        FocusTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// The latest generation handed out, 0 before the first focus.
    pub fn current(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Proof that a load was started by a particular focus event.
#[derive(Debug, Clone)]
pub struct FocusTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl FocusTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether no newer focus has started since this ticket was taken.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_invalidates_older() {
        let generations = FocusGenerations::new();
        assert_eq!(generations.current(), 0);

        let first = generations.begin();
        assert!(first.is_current());

        let second = generations.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(second.generation(), 2);
    }

    #[test]
    fn test_clones_share_the_counter() {
        let generations = FocusGenerations::new();
        let ticket = generations.begin();
        generations.clone().begin();
        assert!(!ticket.is_current());
    }
}
