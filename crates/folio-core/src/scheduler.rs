#![forbid(unsafe_code)]

//! Deterministic one-shot task scheduler driven by the host clock.
//!
//! The page never blocks and never spawns threads. Delayed work (fade-outs,
//! auto-close timers, staggered reveals) is registered here with a delay
//! relative to the current host time and comes back out of
//! [`Scheduler::advance_to`] once the host reports a time at or past its
//! deadline.
//!
//! # Invariants
//!
//! 1. Every scheduled task fires at most once.
//! 2. Due tasks are returned in deadline order; ties keep scheduling order.
//! 3. A cancelled task never fires.
//! 4. Time is monotonic: reporting an earlier time than the current one is
//!    ignored (the clock does not move backwards).

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled task, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw sequence number (useful in logs).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Host-driven scheduler for one-shot deferred tasks.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler with its clock at `0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current host time as last reported.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now.saturating_add(delay);
        self.queue.insert((deadline, seq), task);
        self.deadlines.insert(seq, deadline);
        TaskId(seq)
    }

    /// Cancel a pending task. Returns the task if it had not fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let deadline = self.deadlines.remove(&id.0)?;
        self.queue.remove(&(deadline, id.0))
    }

    /// Whether `id` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Move the clock to `now` and pop the earliest task that is due.
    ///
    /// Callers loop on this instead of draining everything at once so that
    /// tasks scheduled by a firing task with zero delay are also observed.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TaskId, T)> {
        if now > self.now {
            self.now = now;
        }
        let key = *self.queue.keys().next()?;
        if key.0 > self.now {
            return None;
        }
        let task = self.queue.remove(&key)?;
        self.deadlines.remove(&key.1);
        Some((TaskId(key.1), task))
    }

    /// Move the clock to `now` and return every task that is due, in order.
    pub fn advance_to(&mut self, now: Duration) -> Vec<(TaskId, T)> {
        let mut due = Vec::new();
        while let Some(entry) = self.pop_due(now) {
            due.push(entry);
        }
        due
    }
}
