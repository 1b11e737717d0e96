//! Binary min-heap keyed by a float priority.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    priority: f64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so that std's max-heap pops the lowest priority; equal
    // priorities pop in insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A min-priority queue over arbitrary payloads.
///
/// Not thread-safe; each solver call owns its own queue.
///
/// # Examples
///
/// ```
/// use u_logistics::pathfinding::MinQueue;
///
/// let mut q = MinQueue::new();
/// q.push("far", 9.0);
/// q.push("near", 1.5);
/// q.push("mid", 4.0);
/// assert_eq!(q.pop(), Some(("near", 1.5)));
/// assert_eq!(q.len(), 2);
/// ```
pub struct MinQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> MinQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, item: T, priority: f64) {
        self.heap.push(Entry {
            priority,
            seq: self.next_seq,
            item,
        });
        self.next_seq += 1;
    }

    /// Removes the item with the lowest priority.
    pub fn pop(&mut self) -> Option<(T, f64)> {
        self.heap.pop().map(|e| (e.item, e.priority))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for MinQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_ascending() {
        let mut q = MinQueue::new();
        for (item, p) in [(1, 5.0), (2, -1.0), (3, 3.5), (4, 0.0), (5, 10.0)] {
            q.push(item, p);
        }
        let order: Vec<i32> = std::iter::from_fn(|| q.pop().map(|(i, _)| i)).collect();
        assert_eq!(order, vec![2, 4, 3, 1, 5]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_ties_fifo() {
        let mut q = MinQueue::new();
        q.push('a', 1.0);
        q.push('b', 1.0);
        q.push('c', 1.0);
        assert_eq!(q.pop().map(|(c, _)| c), Some('a'));
        assert_eq!(q.pop().map(|(c, _)| c), Some('b'));
    }

    #[test]
    fn test_empty() {
        let mut q: MinQueue<u8> = MinQueue::default();
        assert_eq!(q.len(), 0);
        assert!(q.pop().is_none());
    }

    #[test]
    fn test_infinity_last() {
        let mut q = MinQueue::new();
        q.push(1, f64::INFINITY);
        q.push(2, 1e300);
        assert_eq!(q.pop().map(|(i, _)| i), Some(2));
    }
}
