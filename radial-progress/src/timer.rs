//! Cancellable delayed tasks.
//!
//! A [`TimerQueue`] replaces the post-delayed/remove-callbacks pair a platform
//! handler offers. Scheduling returns a [`TaskHandle`]; handles are
//! generational, so once a task fired or was cancelled its handle goes stale
//! and cancelling it again does nothing.

use std::time::Instant;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle to a scheduled task.
    pub struct TaskHandle;
}

#[derive(Debug)]
struct Entry<T> {
    due: Instant,
    seq: u64,
    payload: T,
}

/// Pending tasks ordered by due time, ties broken by scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: SlotMap<TaskHandle, Entry<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedules `payload` to become due at `due`.
    pub fn schedule(&mut self, due: Instant, payload: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(Entry { due, seq, payload })
    }

    /// Cancels a task. Returns `false` when the handle is stale.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.entries.remove(handle).is_some()
    }

    /// Whether `handle` still refers to a pending task.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.contains_key(handle)
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TaskHandle, Instant, T)> {
        let handle = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.due <= now)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(handle, _)| handle)?;
        self.entries
            .remove(handle)
            .map(|entry| (handle, entry.due, entry.payload))
    }

    /// Earliest due time, if anything is pending.
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.values().map(|entry| entry.due).min()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn pops_in_due_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start + Duration::from_millis(30), "late");
        queue.schedule(start + Duration::from_millis(10), "early");
        queue.schedule(start + Duration::from_millis(10), "early-second");

        assert!(queue.pop_due(start).is_none());
        assert_eq!(queue.next_due(), Some(start + Duration::from_millis(10)));

        let now = start + Duration::from_millis(40);
        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(now))
            .map(|(_, _, payload)| payload)
            .collect();
        assert_eq!(order, ["early", "early-second", "late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn stale_handles_cannot_cancel() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        let fired = queue.schedule(start, 1);
        assert!(queue.pop_due(start).is_some());
        assert!(!queue.cancel(fired));

        let pending = queue.schedule(start + Duration::from_secs(1), 2);
        assert!(queue.is_pending(pending));
        assert!(queue.cancel(pending));
        assert!(!queue.cancel(pending));
        assert!(!queue.is_pending(pending));
        assert_eq!(queue.len(), 0);
    }
}
