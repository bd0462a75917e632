//! Per-worker state: the port arena, round-robin cursor and wake primitive
//!
//! Each worker owns the ports mapped to it. Port records live in a map for
//! O(1) lookup, with an insertion-ordered id list alongside for stable
//! round-robin iteration. The cursor into that list persists across dequeue
//! calls so successive calls resume past the last visited port.

use crate::dispatch::port::PortState;
use crate::dispatch::types::{PortId, PriorityId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Condvar, Mutex};

/// Mutable worker state, always accessed under the worker's mutex
#[derive(Debug)]
pub(crate) struct WorkerShard<T> {
    ports: HashMap<PortId, PortState<T>>,
    port_order: Vec<PortId>,
    cursor: usize,
    occupancy: usize,
}

impl<T> WorkerShard<T> {
    pub(crate) fn new() -> Self {
        Self {
            ports: HashMap::new(),
            port_order: Vec::new(),
            cursor: 0,
            occupancy: 0,
        }
    }

    /// Total buffered items across all ports of this worker
    pub(crate) fn occupancy(&self) -> usize {
        self.occupancy
    }

    pub(crate) fn port_count(&self) -> usize {
        self.port_order.len()
    }

    pub(crate) fn port(&self, port: PortId) -> Option<&PortState<T>> {
        self.ports.get(&port)
    }

    /// Create the port record on first mutating access
    ///
    /// Idempotent; read-only queries must not call this, so that querying an
    /// unknown port never registers it.
    pub(crate) fn ensure_port(
        &mut self,
        port: PortId,
        priority_levels: usize,
        default_capacity: usize,
    ) -> &mut PortState<T> {
        match self.ports.entry(port) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                log::debug!(
                    "Registered port {} ({} priority queues, capacity {})",
                    port,
                    priority_levels,
                    default_capacity
                );
                self.port_order.push(port);
                entry.insert(PortState::new(priority_levels, default_capacity))
            }
        }
    }

    /// Advance the round-robin cursor one position and return the port it
    /// pointed at
    ///
    /// The cursor moves exactly one slot per call whether or not the returned
    /// port has anything buffered. Callers must ensure at least one port is
    /// registered.
    pub(crate) fn advance_cursor(&mut self) -> PortId {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.port_order.len();
        self.port_order[index]
    }

    pub(crate) fn port_occupancy(&self, port: PortId) -> usize {
        self.ports.get(&port).map_or(0, PortState::occupancy)
    }

    /// Push through to a port queue, keeping the worker occupancy in step
    pub(crate) fn push_to(&mut self, port: PortId, priority: PriorityId, item: T) -> bool {
        let accepted = match self.ports.get_mut(&port) {
            Some(state) => state.try_push(priority, item),
            None => false,
        };
        if accepted {
            self.occupancy += 1;
        }
        accepted
    }

    /// Pop from a port in its rotation order, keeping the worker occupancy in
    /// step
    pub(crate) fn pop_from(&mut self, port: PortId) -> Option<(PriorityId, T)> {
        let popped = self.ports.get_mut(&port)?.pop_next();
        if popped.is_some() {
            self.occupancy -= 1;
        }
        popped
    }
}

/// One consumer context: the shard plus the primitive dequeuers block on
///
/// The condvar is signalled after every successful enqueue to any port of
/// this worker; dequeuers re-check the shard occupancy under the lock after
/// every wake.
#[derive(Debug)]
pub(crate) struct Worker<T> {
    pub(crate) shard: Mutex<WorkerShard<T>>,
    pub(crate) ready: Condvar,
}

impl<T> Worker<T> {
    pub(crate) fn new() -> Self {
        Self {
            shard: Mutex::new(WorkerShard::new()),
            ready: Condvar::new(),
        }
    }
}
