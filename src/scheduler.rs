// SPDX-License-Identifier: MPL-2.0
//! Host timer queue on a virtual millisecond clock.
//!
//! Timers carry plain data jobs instead of closures. The owner pops due jobs
//! in order and runs them itself, which keeps every continuation inspectable
//! and lets tests step time deterministically.

use std::collections::BTreeMap;

/// Handle returned by [`Scheduler::set_timeout`] and [`Scheduler::set_interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<J> {
    id: TimerId,
    period: Option<u64>,
    job: J,
}

/// Ordered timer queue. Timers due at the same instant run in the order
/// they were scheduled.
#[derive(Debug, Clone)]
pub struct Scheduler<J> {
    now: u64,
    next_seq: u64,
    timers: BTreeMap<(u64, u64), Timer<J>>,
}

impl<J: Clone> Scheduler<J> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            timers: BTreeMap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Runs `job` once, `delay` milliseconds from now.
    pub fn set_timeout(&mut self, delay: u64, job: J) -> TimerId {
        self.insert(self.now.saturating_add(delay), None, job)
    }

    /// Runs `job` every `period` milliseconds until cleared. A zero period
    /// is treated as one millisecond.
    pub fn set_interval(&mut self, period: u64, job: J) -> TimerId {
        let period = period.max(1);
        self.insert(self.now.saturating_add(period), Some(period), job)
    }

    fn insert(&mut self, due: u64, period: Option<u64>, job: J) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = TimerId(seq);
        self.timers.insert((due, seq), Timer { id, period, job });
        id
    }

    /// Cancels a pending timer. Unknown ids are ignored.
    pub fn clear(&mut self, id: TimerId) {
        self.timers.retain(|_, timer| timer.id != id);
    }

    /// Due time of the earliest pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.timers.keys().next().map(|&(due, _)| due)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pops the earliest job due at or before `deadline`, moving the clock
    /// to its due time. Intervals are re-armed before the job is returned.
    pub fn pop_due(&mut self, deadline: u64) -> Option<(TimerId, J)> {
        let (&(due, seq), _) = self.timers.iter().next()?;
        if due > deadline {
            return None;
        }
        let timer = self.timers.remove(&(due, seq))?;
        self.now = self.now.max(due);
        if let Some(period) = timer.period {
            let next = self.next_seq;
            self.next_seq += 1;
            self.timers.insert(
                (due.saturating_add(period), next),
                Timer {
                    id: timer.id,
                    period: timer.period,
                    job: timer.job.clone(),
                },
            );
        }
        Some((timer.id, timer.job))
    }

    /// Moves the clock forward without running anything.
    pub fn advance_clock(&mut self, to: u64) {
        self.now = self.now.max(to);
    }
}

impl<J: Clone> Default for Scheduler<J> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<&'static str>, deadline: u64) -> Vec<(u64, &'static str)> {
        let mut ran = Vec::new();
        while let Some((_, job)) = scheduler.pop_due(deadline) {
            ran.push((scheduler.now(), job));
        }
        scheduler.advance_clock(deadline);
        ran
    }

    #[test]
    fn timeouts_run_in_due_order_then_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.set_timeout(100, "b");
        scheduler.set_timeout(50, "a");
        scheduler.set_timeout(100, "c");

        assert_eq!(drain(&mut scheduler, 100), vec![(50, "a"), (100, "b"), (100, "c")]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn jobs_past_the_deadline_stay_queued() {
        let mut scheduler = Scheduler::new();
        scheduler.set_timeout(1000, "late");

        assert!(drain(&mut scheduler, 999).is_empty());
        assert_eq!(scheduler.now(), 999);
        assert_eq!(scheduler.next_due(), Some(1000));
    }

    #[test]
    fn intervals_rearm_until_cleared() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.set_interval(10, "tick");

        assert_eq!(drain(&mut scheduler, 35).len(), 3);
        scheduler.clear(id);
        assert!(drain(&mut scheduler, 100).is_empty());
    }

    #[test]
    fn zero_period_interval_still_advances() {
        let mut scheduler = Scheduler::new();
        scheduler.set_interval(0, "spin");
        assert_eq!(drain(&mut scheduler, 3).len(), 3);
    }

    #[test]
    fn delays_are_relative_to_the_current_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_clock(500);
        scheduler.set_timeout(100, "x");
        assert_eq!(scheduler.next_due(), Some(600));
    }

    #[test]
    fn clearing_unknown_timer_is_a_no_op() {
        let mut scheduler: Scheduler<&'static str> = Scheduler::new();
        let id = scheduler.set_timeout(1, "once");
        scheduler.clear(id);
        scheduler.clear(id);
        assert_eq!(scheduler.pending(), 0);
    }
}
