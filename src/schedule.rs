//! Deferred one-shot tasks keyed by logical time
//!
//! The frame driver advances the clock by each frame's delta and then pops
//! whatever has come due. A task carries the liveness predicate it was
//! scheduled under; the predicate is evaluated against the owner's state at
//! fire time, and a task whose predicate fails is dropped without running.
//! There is no cancellation beyond that.

use std::fmt;

/// Liveness predicate evaluated when a task comes due
pub type Guard<C> = Box<dyn Fn(&C) -> bool>;

struct Deferred<C, T> {
    due: f64,
    seq: u64,
    guard: Guard<C>,
    task: T,
}

/// Queue of tasks waiting for logical time to pass
pub struct DeferredQueue<C, T> {
    /// Logical time in seconds since the queue was created
    now: f64,
    next_seq: u64,
    /// Kept sorted by `(due, seq)`
    pending: Vec<Deferred<C, T>>,
}

impl<C, T> Default for DeferredQueue<C, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, T> fmt::Debug for DeferredQueue<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("now", &self.now)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl<C, T> DeferredQueue<C, T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Run `task` once `delay` seconds of logical time have passed, provided
    /// `guard` still holds then. Tasks due at the same time fire in
    /// scheduling order.
    pub fn schedule(&mut self, delay: f64, guard: Guard<C>, task: T) {
        let due = self.now + delay.max(0.0);
        let seq = self.next_seq;
        self.next_seq += 1;

        let at = self
            .pending
            .partition_point(|d| (d.due, d.seq) <= (due, seq));
        self.pending.insert(at, Deferred { due, seq, guard, task });
    }

    /// Move logical time forward
    pub fn advance(&mut self, dt: f64) {
        if dt > 0.0 {
            self.now += dt;
        }
    }

    /// Pop the earliest due task whose guard holds for `owner`.
    ///
    /// Due tasks whose guard fails are discarded along the way. Call in a
    /// loop so that each task sees the state left by the one before it.
    pub fn pop_due(&mut self, owner: &C) -> Option<T> {
        while self.pending.first().is_some_and(|d| d.due <= self.now) {
            let deferred = self.pending.remove(0);
            if (deferred.guard)(owner) {
                return Some(deferred.task);
            }
            log::debug!("Dropped stale deferred task (due at {:.3}s)", deferred.due);
        }
        None
    }
}
