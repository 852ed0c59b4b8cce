use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Deferred phase change the controller asks its host to deliver later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Transition {
    /// End of the intro: hide the reference and open the grid for input.
    RevealOptions,
    /// End of partial/failure feedback: unlock the remaining slots.
    UnlockInput,
    /// End of success feedback: start a fresh round.
    NextRound,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration, transition: Transition) -> TimerToken;
    fn cancel(&mut self, token: TimerToken);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub token: TimerToken,
    pub transition: Transition,
    pub due: Duration,
}

#[derive(Debug, Default)]
struct TimerQueue {
    now: Duration,
    next_token: u64,
    // Kept in scheduling order; ties on `due` fire in that order.
    pending: Vec<FiredTimer>,
}

impl TimerQueue {
    fn pop_due(&mut self, limit: Duration) -> Option<FiredTimer> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= limit)
            .min_by_key(|(_, timer)| (timer.due, timer.token))
            .map(|(idx, _)| idx)?;
        let timer = self.pending.remove(idx);
        self.now = self.now.max(timer.due);
        Some(timer)
    }
}

/// Virtual-clock scheduler. Clones share one queue, so a host can keep a
/// handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<TimerQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn pending(&self) -> Vec<FiredTimer> {
        self.inner.borrow().pending.clone()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .pending
            .iter()
            .map(|timer| timer.due)
            .min()
    }

    /// Moves the clock forward and returns every timer that came due, in order.
    pub fn advance(&self, by: Duration) -> Vec<FiredTimer> {
        let mut queue = self.inner.borrow_mut();
        let limit = queue.now + by;
        let mut fired = Vec::new();
        while let Some(timer) = queue.pop_due(limit) {
            fired.push(timer);
        }
        queue.now = limit;
        fired
    }

    /// Jumps straight to the earliest pending timer.
    pub fn advance_to_next(&self) -> Option<FiredTimer> {
        let mut queue = self.inner.borrow_mut();
        let due = queue.pending.iter().map(|timer| timer.due).min()?;
        queue.pop_due(due)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, transition: Transition) -> TimerToken {
        let mut queue = self.inner.borrow_mut();
        queue.next_token += 1;
        let token = TimerToken(queue.next_token);
        let due = queue.now + delay;
        queue.pending.push(FiredTimer {
            token,
            transition,
            due,
        });
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.inner
            .borrow_mut()
            .pending
            .retain(|timer| timer.token != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_in_due_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.schedule_after(ms(300), Transition::NextRound);
        let early = scheduler.schedule_after(ms(100), Transition::UnlockInput);
        let fired = scheduler.advance(ms(500));
        let tokens: Vec<_> = fired.iter().map(|timer| timer.token).collect();
        assert_eq!(tokens, vec![early, late]);
        assert_eq!(scheduler.now(), ms(500));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn advance_leaves_future_timers() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_after(ms(250), Transition::RevealOptions);
        assert!(scheduler.advance(ms(249)).is_empty());
        assert_eq!(scheduler.next_due(), Some(ms(250)));
        let fired = scheduler.advance(ms(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].transition, Transition::RevealOptions);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let token = scheduler.schedule_after(ms(10), Transition::UnlockInput);
        scheduler.cancel(token);
        assert!(scheduler.advance_to_next().is_none());
        assert!(scheduler.advance(ms(100)).is_empty());
    }

    #[test]
    fn clones_share_the_queue() {
        let host = ManualScheduler::new();
        let mut owned = host.clone();
        owned.schedule_after(ms(40), Transition::NextRound);
        let fired = host.advance_to_next().expect("timer");
        assert_eq!(fired.due, ms(40));
        assert_eq!(host.now(), ms(40));
        assert_eq!(owned.pending_count(), 0);
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut scheduler = ManualScheduler::new();
        scheduler.advance(ms(1000));
        scheduler.schedule_after(ms(200), Transition::UnlockInput);
        assert_eq!(scheduler.next_due(), Some(ms(1200)));
    }
}
