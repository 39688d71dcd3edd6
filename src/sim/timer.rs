//! One-shot deferred effects against the virtual clock
//!
//! A priority queue keyed by trigger time, drained at the start of each
//! tick before fresh decisions. Replaces ad hoc recursive re-scheduling
//! so deferred timing stays deterministic under test.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Actions a timer can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// A projectile passed its time-to-live without hitting anything
    ExpireProjectile(u32),
    /// Clear the damage flash on an enemy
    ClearHitFlash(u32),
}

#[derive(Debug, Clone)]
struct Entry {
    at_ms: f64,
    seq: u64,
    action: TimerAction,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    // Reversed so the earliest deadline sits at the heap top; ties fire
    // in scheduling order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at_ms
            .total_cmp(&self.at_ms)
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of pending one-shot actions.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl TimerQueue {
    /// Schedule `action` to fire once `now >= at_ms`.
    pub fn schedule(&mut self, at_ms: f64, action: TimerAction) {
        self.heap.push(Entry {
            at_ms,
            seq: self.seq,
            action,
        });
        self.seq += 1;
    }

    /// Pop every action due at `now_ms`, in deadline order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<TimerAction> {
        let mut due = Vec::new();
        while let Some(entry) = self.heap.peek() {
            if entry.at_ms > now_ms {
                break;
            }
            if let Some(entry) = self.heap.pop() {
                due.push(entry.action);
            }
        }
        due
    }

    /// Drop all pending actions (mode switch / game over).
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut q = TimerQueue::default();
        q.schedule(300.0, TimerAction::ExpireProjectile(3));
        q.schedule(100.0, TimerAction::ExpireProjectile(1));
        q.schedule(200.0, TimerAction::ClearHitFlash(2));

        assert_eq!(
            q.drain_due(250.0),
            vec![
                TimerAction::ExpireProjectile(1),
                TimerAction::ClearHitFlash(2)
            ]
        );
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(300.0), vec![TimerAction::ExpireProjectile(3)]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_not_due_stays_queued() {
        let mut q = TimerQueue::default();
        q.schedule(1000.0, TimerAction::ClearHitFlash(7));
        assert!(q.drain_due(999.9).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut q = TimerQueue::default();
        q.schedule(50.0, TimerAction::ClearHitFlash(1));
        q.schedule(50.0, TimerAction::ClearHitFlash(2));
        assert_eq!(
            q.drain_due(50.0),
            vec![TimerAction::ClearHitFlash(1), TimerAction::ClearHitFlash(2)]
        );
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut q = TimerQueue::default();
        q.schedule(10.0, TimerAction::ExpireProjectile(1));
        q.schedule(20.0, TimerAction::ExpireProjectile(2));
        q.clear();
        assert!(q.drain_due(f64::MAX).is_empty());
    }
}
