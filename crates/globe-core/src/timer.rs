//! Deterministic one-shot timer queue.
//!
//! Time only moves when the owner calls [`TimerQueue::advance_to`], which keeps
//! the focus countdown testable and lets the native event loop drive it from
//! its own clock.

use crate::focus::{Scheduler, TimerCallback, TimerId};
use instant::Instant;
use smallvec::SmallVec;
use std::time::Duration;

struct Pending {
    id: TimerId,
    deadline: Instant,
    on_fire: TimerCallback,
}

pub struct TimerQueue {
    now: Instant,
    next_id: u64,
    pending: SmallVec<[Pending; 4]>,
}

impl TimerQueue {
    pub fn new(start: Instant) -> Self {
        Self {
            now: start,
            next_id: 1,
            pending: SmallVec::new(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Move the clock to `now` and run every callback that came due, earliest first.
    ///
    /// The clock never goes backwards. Returns the number of callbacks run.
    pub fn advance_to(&mut self, now: Instant) -> usize {
        if now > self.now {
            self.now = now;
        }
        let mut fired = 0;
        while let Some(index) = self.earliest_due() {
            let Pending { id, on_fire, .. } = self.pending.remove(index);
            on_fire(id);
            fired += 1;
        }
        fired
    }

    pub fn advance_by(&mut self, elapsed: Duration) -> usize {
        let now = self.now + elapsed;
        self.advance_to(now)
    }

    fn earliest_due(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= self.now)
            .min_by_key(|(_, p)| (p.deadline, p.id))
            .map(|(i, _)| i)
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, on_fire: TimerCallback) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            deadline: self.now + delay,
            on_fire,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|p| p.id != id);
    }
}
