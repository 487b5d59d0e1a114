//! Cancellable deferred tasks for a single-threaded UI loop.
//!
//! Nothing runs on its own: the owner calls [`DeferredQueue::poll_due`] once per
//! frame and handles whatever has come due.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

struct Pending<T> {
    id: TaskId,
    due: Instant,
    task: T,
}

pub struct DeferredQueue<T> {
    pending: Vec<Pending<T>>,
    next_id: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to come due `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: now + delay,
            task,
        });
        id
    }

    /// Drops a pending task. Returns false if it already ran or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Removes and returns every task due at `now`, earliest first.
    pub fn poll_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due.sort_by_key(|p| (p.due, p.id.0));
        due.into_iter().map(|p| p.task).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_come_due_in_order() {
        let start = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(start, Duration::from_millis(20), "late");
        queue.schedule(start, Duration::from_millis(10), "early");

        assert!(queue.poll_due(start).is_empty());
        assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(10)));

        assert_eq!(queue.poll_due(start + Duration::from_millis(10)), vec!["early"]);
        assert_eq!(queue.poll_due(start + Duration::from_millis(50)), vec!["late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut queue = DeferredQueue::new();
        let id = queue.schedule(start, Duration::from_millis(10), 1);

        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(queue.poll_due(start + Duration::from_secs(1)).is_empty());
        assert_eq!(queue.next_deadline(), None);
    }
}
