//! Queue of deferred battle transitions, dropped wholesale on reset.
//!
//! The queue keeps its own virtual clock. Presenters decide how fast that
//! clock moves (real time, accelerated, or instantly in tests), but never
//! the order in which tasks fire: tasks run by due time, and tasks due at the
//! same instant run in the order they were scheduled.

use std::collections::BTreeMap;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct TaskQueue<T> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), T>,
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `task` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now + delay;
        self.pending.insert((due, seq), task);
        trace!(seq, due_ms = due.as_millis() as u64, "task scheduled");
    }

    /// Drops every pending task and returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Absolute virtual time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Time left until the earliest pending task falls due.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_due().map(|due| due.saturating_sub(self.now))
    }

    /// Pops the earliest task due at or before `deadline`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<T> {
        let key = *self.pending.keys().next()?;
        if key.0 > deadline {
            return None;
        }
        self.now = self.now.max(key.0);
        self.pending.remove(&key)
    }

    /// Moves the clock forward to `time`. The clock never runs backwards.
    pub fn advance_clock(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
