//! Per-port state: priority queues, capacities and the rotation offset
//!
//! A port owns a fixed number of FIFO queues, one per priority level, plus a
//! parallel capacity vector and a cached total occupancy. The occupancy is
//! maintained incrementally so the dequeue path can skip empty ports without
//! touching their queues.

use crate::dispatch::types::{PortStats, PriorityId};
use std::collections::VecDeque;

#[derive(Debug)]
pub(crate) struct PortState<T> {
    queues: Vec<VecDeque<T>>,
    capacities: Vec<usize>,
    highest_priority: PriorityId,
    occupancy: usize,
}

impl<T> PortState<T> {
    pub(crate) fn new(priority_levels: usize, default_capacity: usize) -> Self {
        let mut queues = Vec::with_capacity(priority_levels);
        queues.resize_with(priority_levels, VecDeque::new);
        Self {
            queues,
            capacities: vec![default_capacity; priority_levels],
            highest_priority: 0,
            occupancy: 0,
        }
    }

    pub(crate) fn occupancy(&self) -> usize {
        self.occupancy
    }

    pub(crate) fn highest_priority(&self) -> PriorityId {
        self.highest_priority
    }

    /// Occupancy of one priority queue, `None` if the priority is out of range
    pub(crate) fn queue_len(&self, priority: PriorityId) -> Option<usize> {
        self.queues.get(priority).map(VecDeque::len)
    }

    /// Append an item to the given priority queue unless it is at capacity
    ///
    /// Returns `true` if the item was accepted. The caller must have
    /// validated the priority against the level count.
    pub(crate) fn try_push(&mut self, priority: PriorityId, item: T) -> bool {
        if self.queues[priority].len() >= self.capacities[priority] {
            return false;
        }
        self.queues[priority].push_back(item);
        self.occupancy += 1;
        true
    }

    /// Remove the oldest item from the first non-empty queue in rotation order
    ///
    /// Queues are scanned as `(highest_priority + k) % levels` for ascending
    /// `k`, so the configured offset is served first and the queue just below
    /// it last. Returns the serving priority with the item.
    pub(crate) fn pop_next(&mut self) -> Option<(PriorityId, T)> {
        let levels = self.queues.len();
        for k in 0..levels {
            let priority = (self.highest_priority + k) % levels;
            if let Some(item) = self.queues[priority].pop_front() {
                self.occupancy -= 1;
                return Some((priority, item));
            }
        }
        None
    }

    pub(crate) fn set_capacity(&mut self, priority: PriorityId, capacity: usize) {
        self.capacities[priority] = capacity;
    }

    pub(crate) fn set_all_capacities(&mut self, capacity: usize) {
        for slot in self.capacities.iter_mut() {
            *slot = capacity;
        }
    }

    /// Designate the queue served first; caller validates the range
    pub(crate) fn rotate(&mut self, priority: PriorityId) {
        self.highest_priority = priority;
    }

    pub(crate) fn stats(&self) -> PortStats {
        PortStats {
            occupancy: self.occupancy,
            queue_occupancies: self.queues.iter().map(VecDeque::len).collect(),
            queue_capacities: self.capacities.clone(),
            highest_priority: self.highest_priority,
        }
    }
}
