//! Keyed, cancellable deferred tasks.
//!
//! # Invariants
//! - At most one pending task per key; scheduling again replaces it.
//! - Every scheduled task gets its own handle; rescheduling a key hands out a
//!   new one.
//! - Cancelling one key never touches another key's task.

use std::collections::BTreeMap;

/// Identity of one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy)]
struct PendingTask {
    handle: TaskHandle,
    due_at: u64,
}

/// Pending tasks keyed by `K`, fired by polling with the current time.
#[derive(Debug, Clone)]
pub struct DeferredTasks<K: Ord + Clone> {
    pending: BTreeMap<K, PendingTask>,
    next_handle: u64,
}

impl<K: Ord + Clone> Default for DeferredTasks<K> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_handle: 1,
        }
    }
}

impl<K: Ord + Clone> DeferredTasks<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` at `due_at`, replacing any task pending for it.
    pub fn schedule(&mut self, key: K, due_at: u64) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.insert(key, PendingTask { handle, due_at });
        handle
    }

    /// Cancels the task pending for `key`.
    pub fn cancel(&mut self, key: &K) -> Option<TaskHandle> {
        self.pending.remove(key).map(|task| task.handle)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every key due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: u64) -> Vec<K> {
        let mut due = self
            .pending
            .iter()
            .filter(|(_, task)| task.due_at <= now)
            .map(|(key, task)| (task.due_at, task.handle, key.clone()))
            .collect::<Vec<_>>();
        due.sort_by(|left, right| (left.0, left.1).cmp(&(right.0, right.1)));
        for (_, _, key) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(_, _, key)| key).collect()
    }

    /// Drops every pending task. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::DeferredTasks;

    #[test]
    fn fires_only_due_tasks_in_due_order() {
        let mut tasks = DeferredTasks::new();
        tasks.schedule("late", 300);
        tasks.schedule("early", 100);
        tasks.schedule("middle", 200);

        assert_eq!(tasks.drain_due(99), Vec::<&str>::new());
        assert_eq!(tasks.drain_due(200), vec!["early", "middle"]);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks.drain_due(1_000), vec!["late"]);
        assert!(tasks.is_empty());
    }

    #[test]
    fn rescheduling_replaces_pending_task() {
        let mut tasks = DeferredTasks::new();
        let stale = tasks.schedule("a", 100);
        let fresh = tasks.schedule("a", 250);
        assert_ne!(stale, fresh);

        assert!(tasks.drain_due(100).is_empty());
        assert_eq!(tasks.cancel(&"a"), Some(fresh));
        assert!(!tasks.is_pending(&"a"));
    }

    #[test]
    fn cancelling_one_key_leaves_others() {
        let mut tasks = DeferredTasks::new();
        tasks.schedule("a", 100);
        tasks.schedule("b", 100);
        assert!(tasks.cancel(&"a").is_some());
        assert!(tasks.cancel(&"a").is_none());
        assert_eq!(tasks.drain_due(100), vec!["b"]);
    }

    #[test]
    fn clear_reports_dropped_count() {
        let mut tasks = DeferredTasks::new();
        tasks.schedule(1_u8, 10);
        tasks.schedule(2_u8, 20);
        assert_eq!(tasks.clear(), 2);
        assert!(tasks.drain_due(u64::MAX).is_empty());
    }
}
