/// Identifies one debounce cycle. A timer only acts if its ticket is still
/// the current one when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Bookkeeping for the single pending save timer.
///
/// Holds at most one handle. Re-arming hands back the previous handle so the
/// caller can cancel it, and bumps the generation so a timer that was already
/// queued by the runtime when it got cancelled still recognizes itself as stale.
#[derive(Debug)]
pub struct Debouncer<H> {
    generation: u64,
    pending: Option<H>,
}

impl<H> Default for Debouncer<H> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<H> Debouncer<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new cycle. Returns its ticket and the superseded handle, if any.
    pub fn rearm(&mut self) -> (Ticket, Option<H>) {
        self.generation += 1;
        (Ticket(self.generation), self.pending.take())
    }

    /// Records the handle of the timer scheduled for `ticket`. A handle for a
    /// cycle that has since been superseded is handed back to be cancelled.
    pub fn arm(&mut self, ticket: Ticket, handle: H) -> Option<H> {
        if ticket.0 == self.generation {
            self.pending.replace(handle)
        } else {
            Some(handle)
        }
    }

    /// Called by a firing timer. True if the cycle is still current, in which
    /// case the bookkeeping is cleared.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.generation += 1;
        self.pending = None;
        true
    }

    /// Invalidates the current cycle. Safe to call with nothing pending.
    pub fn clear(&mut self) -> Option<H> {
        self.generation += 1;
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearm_hands_back_previous_handle() {
        let mut debounce = Debouncer::new();
        let (first, previous) = debounce.rearm();
        assert_eq!(previous, None);
        assert_eq!(debounce.arm(first, "t1"), None);

        let (second, previous) = debounce.rearm();
        assert_eq!(previous, Some("t1"));
        assert_eq!(debounce.arm(second, "t2"), None);
        assert!(debounce.is_pending());
    }

    #[test]
    fn superseded_ticket_does_not_fire() {
        let mut debounce = Debouncer::new();
        let (first, _) = debounce.rearm();
        debounce.arm(first, 1);
        let (second, _) = debounce.rearm();
        debounce.arm(second, 2);

        assert!(!debounce.fire(first));
        assert!(debounce.is_pending());
        assert!(debounce.fire(second));
        assert!(!debounce.is_pending());
        // A ticket fires at most once.
        assert!(!debounce.fire(second));
    }

    #[test]
    fn late_arm_for_stale_cycle_is_returned() {
        let mut debounce = Debouncer::new();
        let (first, _) = debounce.rearm();
        let (_second, _) = debounce.rearm();
        assert_eq!(debounce.arm(first, 7), Some(7));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut debounce: Debouncer<u32> = Debouncer::new();
        assert_eq!(debounce.clear(), None);
        let (ticket, _) = debounce.rearm();
        debounce.arm(ticket, 3);
        assert_eq!(debounce.clear(), Some(3));
        assert_eq!(debounce.clear(), None);
        assert!(!debounce.fire(ticket));
    }
}
