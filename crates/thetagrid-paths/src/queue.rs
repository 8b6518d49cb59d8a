//! Array-backed binary min-heap with identity-based membership and removal.
//!
//! Unlike `std::collections::BinaryHeap`, [`PriorityQueue`] can test whether
//! a key is queued and remove it from any position, which the Theta*
//! search needs to re-prioritise a vertex after its cost improves.

use thiserror::Error;

/// Returned by [`PriorityQueue::dequeue`] when the queue is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dequeue from an empty priority queue")]
pub struct EmptyQueueError;

#[derive(Debug, Clone, Copy)]
struct Entry<K> {
    key: K,
    cost: f32,
}

/// Binary min-heap keyed by cost.
///
/// Stored densely: the children of index `i` are `2i + 1` and `2i + 2`, its
/// parent is `(i - 1) / 2`. Every entry's cost is ≤ the costs of its
/// children. Keys are compared by identity (`PartialEq`), never by cost, so
/// several keys may share a cost.
#[derive(Debug, Clone)]
pub struct PriorityQueue<K> {
    heap: Vec<Entry<K>>,
}

impl<K> Default for PriorityQueue<K> {
    fn default() -> Self {
        Self { heap: Vec::new() }
    }
}

impl<K: Copy + PartialEq> PriorityQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` with priority `cost`. O(log n).
    pub fn enqueue(&mut self, key: K, cost: f32) {
        self.heap.push(Entry { key, cost });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the key with the lowest cost. O(log n).
    pub fn dequeue(&mut self) -> Result<K, EmptyQueueError> {
        if self.heap.is_empty() {
            return Err(EmptyQueueError);
        }
        // Moves the last entry into the root slot.
        let first = self.heap.swap_remove(0);
        self.sift_down(0);
        Ok(first.key)
    }

    /// Whether `key` is queued. O(n).
    pub fn contains(&self, key: K) -> bool {
        self.position(key).is_some()
    }

    /// Remove the first entry for `key`, restoring the heap order.
    /// Returns `false` if `key` was not queued.
    pub fn remove(&mut self, key: K) -> bool {
        let Some(i) = self.position(key) else {
            return false;
        };
        self.heap.swap_remove(i);
        if i < self.heap.len() {
            // The entry moved into slot i may belong above or below it.
            if i > 0 && self.heap[(i - 1) / 2].cost > self.heap[i].cost {
                self.sift_up(i);
            } else {
                self.sift_down(i);
            }
        }
        true
    }

    /// Whether the queue holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    fn position(&self, key: K) -> Option<usize> {
        self.heap.iter().position(|e| e.key == key)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i != 0 {
            let p = (i - 1) / 2;
            if self.heap[p].cost <= self.heap[i].cost {
                return;
            }
            self.heap.swap(i, p);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                return;
            }
            // Ties go to the left child.
            let right = left + 1;
            let child = if right < len && self.heap[right].cost < self.heap[left].cost {
                right
            } else {
                left
            };
            if self.heap[i].cost <= self.heap[child].cost {
                return;
            }
            self.heap.swap(i, child);
            i = child;
        }
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2].cost <= self.heap[i].cost)
    }
}
