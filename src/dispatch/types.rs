//! Type definitions for the dispatcher
//!
//! This module contains the identifier aliases and the plain data structures
//! returned by the dequeue path and the observability queries.

/// Identifier of a logical output port
pub type PortId = usize;

/// Identifier of a consumer worker, always in `[0, worker_count)`
pub type WorkerId = usize;

/// Index of a priority level within a port, always in `[0, priority_levels)`
pub type PriorityId = usize;

/// A single item delivered by a dequeue call
///
/// Carries the originating port and the priority queue that was served
/// alongside the item itself. Callers that only care about the item or the
/// port can simply ignore the other fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dequeued<T> {
    /// Port the item was enqueued to
    pub port: PortId,
    /// Priority queue the item was taken from
    pub priority: PriorityId,
    /// The item itself
    pub item: T,
}

/// Occupancy snapshot for a single registered port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortStats {
    /// Total buffered items across all priority queues of the port
    pub occupancy: usize,
    /// Buffered items per priority queue, indexed by priority id
    pub queue_occupancies: Vec<usize>,
    /// Configured capacity per priority queue, indexed by priority id
    pub queue_capacities: Vec<usize>,
    /// Priority queue currently served first
    pub highest_priority: PriorityId,
}
