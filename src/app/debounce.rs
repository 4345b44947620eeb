//! Input debouncing on top of non-cancellable host timers.
//!
//! Zellij's `set_timeout` cannot be cancelled, so "restart the timer" is
//! modelled by counting timers still in flight. Every edit schedules a fresh
//! timer; a timer elapsing only fires the search when it is the last one
//! outstanding and a search is still pending.
//!
//! ```text
//! edit  edit      edit
//!  │     │         │
//!  ├─t1──┼─t2──────┼─t3────────┤ fire
//!        │         │           │
//!     t1 elapses  t2 elapses   t3 elapses, outstanding = 0
//!     (2 left)    (1 left)
//! ```

use super::Action;

/// Default quiet period before a search is issued.
pub const DEFAULT_DEBOUNCE_MS: u64 = 450;

#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    delay_secs: f64,
    outstanding: usize,
    pending: bool,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_secs: delay_ms as f64 / 1000.0,
            outstanding: 0,
            pending: false,
        }
    }

    /// Restarts the quiet period and returns the timer to schedule.
    #[must_use]
    pub fn schedule(&mut self) -> Action {
        self.outstanding += 1;
        self.pending = true;
        tracing::trace!(outstanding = self.outstanding, "debounce scheduled");
        Action::ScheduleDebounce {
            seconds: self.delay_secs,
        }
    }

    /// Drops the pending search. Timers already in flight elapse harmlessly.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Records one timer elapsing. Returns `true` when the search should run.
    pub fn elapsed(&mut self) -> bool {
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding == 0 && self.pending {
            self.pending = false;
            return true;
        }
        false
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_last_timer_fires() {
        let mut d = Debouncer::default();
        for _ in 0..3 {
            let _ = d.schedule();
        }
        assert!(!d.elapsed());
        assert!(!d.elapsed());
        assert!(d.elapsed());
        assert!(!d.is_pending());
    }

    #[test]
    fn cancelled_search_never_fires() {
        let mut d = Debouncer::default();
        let _ = d.schedule();
        d.cancel();
        assert!(!d.elapsed());
    }

    #[test]
    fn reschedule_after_cancel_waits_for_all_timers() {
        let mut d = Debouncer::default();
        let _ = d.schedule();
        d.cancel();
        let _ = d.schedule();
        assert!(!d.elapsed());
        assert!(d.elapsed());
    }

    #[test]
    fn stray_timer_is_ignored() {
        let mut d = Debouncer::default();
        assert!(!d.elapsed());
        let _ = d.schedule();
        assert!(d.elapsed());
    }

    #[test]
    fn schedule_uses_configured_delay() {
        let mut d = Debouncer::new(250);
        assert_eq!(d.schedule(), Action::ScheduleDebounce { seconds: 0.25 });
    }
}
