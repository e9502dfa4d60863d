//! Stale-result suppression for background fetches.
//!
//! Each fetch takes a `Ticket` from its tracker before it starts. Results come
//! back tagged with that ticket; if the tracker has moved on (a newer fetch was
//! started, or the view was torn down) the result is discarded instead of
//! being applied to state that no longer asked for it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    /// Start a new request, superseding any in flight.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// Supersede in-flight requests without starting a new one.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut tracker = RequestTracker::default();
        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn invalidate_discards_everything_in_flight() {
        let mut tracker = RequestTracker::default();
        let ticket = tracker.begin();
        tracker.invalidate();
        assert!(!tracker.is_current(ticket));
    }
}
