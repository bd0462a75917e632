//! Dispatcher - central enqueue/dequeue engine
//!
//! The Dispatcher owns one worker record per consumer context and routes
//! every operation to the worker its port maps to. Ports belonging to
//! different workers never contend; everything touching the same worker
//! serializes on that worker's mutex.

use crate::core::sync::handle_mutex_poison;
use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::types::{Dequeued, PortId, PortStats, PriorityId, WorkerId};
use crate::dispatch::worker::{Worker, WorkerShard};
use std::sync::MutexGuard;

/// Number of priority levels per port when none is specified
pub const DEFAULT_PRIORITY_LEVELS: usize = 2;

/// Concurrent multi-port, multi-priority work-item dispatcher
///
/// Producers enqueue items tagged with a port and a priority level; consumer
/// workers dequeue them, each serving the disjoint subset of ports the
/// caller-supplied mapping assigns to it. Within a worker, ports are served
/// round-robin; within a port, priority queues are served in a strict,
/// rotatable order; within a queue, items are strictly FIFO.
///
/// # Thread Safety
///
/// The Dispatcher is fully thread-safe and is meant to be shared across
/// threads with `Arc<Dispatcher<..>>`. Synchronization is one mutex plus one
/// condvar per worker, so operations on ports mapped to different workers
/// proceed in parallel. Only `dequeue` blocks, and only while its worker has
/// nothing buffered; `enqueue` never blocks and reports backpressure as a
/// plain `Ok(false)`.
///
/// # Mapping contract
///
/// `map_to_worker` is invoked on every call that names a port. It must be
/// deterministic and return values in `[0, worker_count)`; the dispatcher
/// bounds-checks the result and surfaces `WorkerOutOfRange` when it is
/// invalid, but cannot detect a mapping that changes its answer for a port
/// that is already registered.
///
/// # Example
///
/// ```rust
/// use switchq::dispatch::Dispatcher;
///
/// # fn main() -> switchq::dispatch::DispatchResult<()> {
/// let dispatcher = Dispatcher::new(2, 64, |port| port % 2)?;
///
/// // Producer side: port 7 maps to worker 1
/// assert!(dispatcher.enqueue(7, 0, "payload")?);
///
/// // Consumer side: blocks until something is buffered for worker 1
/// let delivered = dispatcher.dequeue(1)?;
/// assert_eq!(delivered.port, 7);
/// assert_eq!(delivered.priority, 0);
/// assert_eq!(delivered.item, "payload");
/// # Ok(())
/// # }
/// ```
pub struct Dispatcher<T, M> {
    workers: Vec<Worker<T>>,
    default_capacity: usize,
    priority_levels: usize,
    map_to_worker: M,
}

impl<T, M> Dispatcher<T, M>
where
    M: Fn(PortId) -> WorkerId,
{
    /// Create a dispatcher with the default number of priority levels
    ///
    /// `worker_count` fixes the worker pool for the dispatcher's lifetime and
    /// `default_capacity` is the initial capacity of every priority queue
    /// (`0` is legal and means "always reject"). `map_to_worker` assigns each
    /// port to a worker; see the type-level docs for its contract.
    pub fn new(
        worker_count: usize,
        default_capacity: usize,
        map_to_worker: M,
    ) -> DispatchResult<Self> {
        Self::with_priorities(
            worker_count,
            default_capacity,
            map_to_worker,
            DEFAULT_PRIORITY_LEVELS,
        )
    }

    /// Create a dispatcher with an explicit number of priority levels per port
    pub fn with_priorities(
        worker_count: usize,
        default_capacity: usize,
        map_to_worker: M,
        priority_levels: usize,
    ) -> DispatchResult<Self> {
        if worker_count == 0 {
            return Err(DispatchError::Configuration {
                message: "worker count must be at least 1".to_string(),
            });
        }
        if priority_levels == 0 {
            return Err(DispatchError::Configuration {
                message: "priority level count must be at least 1".to_string(),
            });
        }

        let mut workers = Vec::with_capacity(worker_count);
        workers.resize_with(worker_count, Worker::new);

        log::debug!(
            "Dispatcher created: {} workers, {} priority levels, default capacity {}",
            worker_count,
            priority_levels,
            default_capacity
        );

        Ok(Self {
            workers,
            default_capacity,
            priority_levels,
            map_to_worker,
        })
    }

    /// Number of workers fixed at construction
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Number of priority levels per port fixed at construction
    pub fn priority_levels(&self) -> usize {
        self.priority_levels
    }

    /// Enqueue an item into a specific priority queue of a port
    ///
    /// Registers the port on first use. Returns `Ok(true)` if the item was
    /// accepted, or `Ok(false)` if the target queue is at capacity - the
    /// rejected item is dropped, so callers that want to retry should keep
    /// their own copy. Rejection is backpressure, not an error; it is
    /// expected and frequent under load.
    ///
    /// # Errors
    ///
    /// `PriorityOutOfRange` if `priority` is not a valid level, or
    /// `WorkerOutOfRange` if the mapping returns an invalid worker id. In
    /// both cases nothing is registered or modified.
    pub fn enqueue(&self, port: PortId, priority: PriorityId, item: T) -> DispatchResult<bool> {
        self.check_priority(priority)?;
        let worker = self.worker_for(port)?;
        let mut shard = self.lock_shard(worker)?;

        shard.ensure_port(port, self.priority_levels, self.default_capacity);
        let accepted = shard.push_to(port, priority, item);
        if accepted {
            worker.ready.notify_one();
        } else {
            log::trace!(
                "Enqueue rejected: port {} priority {} at capacity",
                port,
                priority
            );
        }
        Ok(accepted)
    }

    /// Enqueue into priority queue 0 of the port
    ///
    /// Queue 0 is the default destination regardless of any rotation applied
    /// with [`rotate_priority`](Self::rotate_priority).
    pub fn enqueue_default(&self, port: PortId, item: T) -> DispatchResult<bool> {
        self.enqueue(port, 0, item)
    }

    /// Remove and return the next item for a worker, blocking while none is
    /// buffered
    ///
    /// Ports assigned to the worker are visited round-robin starting at a
    /// cursor persisted across calls; the cursor advances one position per
    /// visited port, so a call that skips empty ports resumes exactly where
    /// the scan ended. At the first port with anything buffered, priority
    /// queues are scanned from the port's current highest-priority offset
    /// and the oldest item of the first non-empty queue is taken. Exactly
    /// one port is serviced per call.
    ///
    /// Safe under multiple concurrent dequeuers for the same worker; the
    /// worker mutex serializes them and each successful enqueue wakes at
    /// most one.
    ///
    /// # Errors
    ///
    /// `WorkerOutOfRange` if `worker_id` is not in `[0, worker_count)`.
    pub fn dequeue(&self, worker_id: WorkerId) -> DispatchResult<Dequeued<T>> {
        let worker = self
            .workers
            .get(worker_id)
            .ok_or(DispatchError::WorkerOutOfRange {
                worker_id,
                worker_count: self.workers.len(),
            })?;

        let mut shard = self.lock_shard(worker)?;
        // Re-check after every wake: condvar waits can wake spuriously, and
        // another dequeuer may have drained the shard first.
        while shard.occupancy() == 0 {
            shard = handle_mutex_poison(worker.ready.wait(shard), |message| {
                DispatchError::Internal { message }
            })?;
        }

        let visits = shard.port_count();
        for _ in 0..visits {
            let port = shard.advance_cursor();
            if shard.port_occupancy(port) == 0 {
                continue;
            }
            if let Some((priority, item)) = shard.pop_from(port) {
                return Ok(Dequeued {
                    port,
                    priority,
                    item,
                });
            }
            break;
        }

        // Unreachable while the occupancy invariants hold: a non-zero shard
        // occupancy guarantees some port has a non-empty queue.
        Err(DispatchError::Internal {
            message: "worker occupancy out of sync with port queues".to_string(),
        })
    }

    /// Set the capacity of every priority queue of a port
    ///
    /// Registers the port if it is unknown. Shrinking a capacity below the
    /// current occupancy never evicts buffered items; it only rejects future
    /// enqueues until the queue drains below the new limit.
    pub fn set_port_capacity(&self, port: PortId, capacity: usize) -> DispatchResult<()> {
        let worker = self.worker_for(port)?;
        let mut shard = self.lock_shard(worker)?;
        shard
            .ensure_port(port, self.priority_levels, self.default_capacity)
            .set_all_capacities(capacity);
        Ok(())
    }

    /// Set the capacity of one priority queue of a port
    ///
    /// Registers the port if it is unknown. Fails with `PriorityOutOfRange`
    /// before registering anything if the priority is invalid.
    pub fn set_queue_capacity(
        &self,
        port: PortId,
        priority: PriorityId,
        capacity: usize,
    ) -> DispatchResult<()> {
        self.check_priority(priority)?;
        let worker = self.worker_for(port)?;
        let mut shard = self.lock_shard(worker)?;
        shard
            .ensure_port(port, self.priority_levels, self.default_capacity)
            .set_capacity(priority, capacity);
        Ok(())
    }

    /// Set the priority queue served first for a port
    ///
    /// With the offset set to `i`, queue `i` is served first, `i + 1` second,
    /// and `i - 1` last (mod the level count). An out-of-range priority is
    /// silently ignored: nothing is registered or modified and the call
    /// succeeds, matching the behaviour integrations already rely on.
    pub fn rotate_priority(&self, port: PortId, priority: PriorityId) -> DispatchResult<()> {
        if priority >= self.priority_levels {
            return Ok(());
        }
        let worker = self.worker_for(port)?;
        let mut shard = self.lock_shard(worker)?;
        shard
            .ensure_port(port, self.priority_levels, self.default_capacity)
            .rotate(priority);
        log::trace!("Port {} highest priority rotated to {}", port, priority);
        Ok(())
    }

    /// Priority queue currently served first for a port
    ///
    /// Read-only: an unknown port yields 0 without being registered.
    pub fn highest_priority(&self, port: PortId) -> DispatchResult<PriorityId> {
        let worker = self.worker_for(port)?;
        let shard = self.lock_shard(worker)?;
        Ok(shard.port(port).map_or(0, |state| state.highest_priority()))
    }

    /// Total buffered items across all priority queues of a port
    ///
    /// Read-only: an unknown port yields 0 without being registered.
    pub fn port_size(&self, port: PortId) -> DispatchResult<usize> {
        let worker = self.worker_for(port)?;
        let shard = self.lock_shard(worker)?;
        Ok(shard.port_occupancy(port))
    }

    /// Buffered items in one priority queue of a port
    ///
    /// Read-only and non-registering. An unknown port yields 0 whatever the
    /// priority; a known port with an invalid priority is an error.
    pub fn queue_size(&self, port: PortId, priority: PriorityId) -> DispatchResult<usize> {
        let worker = self.worker_for(port)?;
        let shard = self.lock_shard(worker)?;
        match shard.port(port) {
            None => Ok(0),
            Some(state) => {
                state
                    .queue_len(priority)
                    .ok_or(DispatchError::PriorityOutOfRange {
                        priority,
                        levels: self.priority_levels,
                    })
            }
        }
    }

    /// Total buffered items across all ports of a worker
    pub fn worker_size(&self, worker_id: WorkerId) -> DispatchResult<usize> {
        let worker = self
            .workers
            .get(worker_id)
            .ok_or(DispatchError::WorkerOutOfRange {
                worker_id,
                worker_count: self.workers.len(),
            })?;
        let shard = self.lock_shard(worker)?;
        Ok(shard.occupancy())
    }

    /// Occupancy and capacity snapshot for a port
    ///
    /// Read-only: `None` for an unknown port, which stays unregistered.
    pub fn port_stats(&self, port: PortId) -> DispatchResult<Option<PortStats>> {
        let worker = self.worker_for(port)?;
        let shard = self.lock_shard(worker)?;
        Ok(shard.port(port).map(|state| state.stats()))
    }

    /// Set the capacity of all priority queues for all ports
    #[deprecated(note = "has no effect; use set_port_capacity or set_queue_capacity per port")]
    pub fn set_capacity_for_all(&self, _capacity: usize) {
        // Retained as a no-op for integrations that still call it.
    }

    fn check_priority(&self, priority: PriorityId) -> DispatchResult<()> {
        if priority >= self.priority_levels {
            return Err(DispatchError::PriorityOutOfRange {
                priority,
                levels: self.priority_levels,
            });
        }
        Ok(())
    }

    /// Resolve a port to its worker, bounds-checking the mapping's answer
    fn worker_for(&self, port: PortId) -> DispatchResult<&Worker<T>> {
        let worker_id = (self.map_to_worker)(port);
        self.workers
            .get(worker_id)
            .ok_or(DispatchError::WorkerOutOfRange {
                worker_id,
                worker_count: self.workers.len(),
            })
    }

    fn lock_shard<'a>(
        &self,
        worker: &'a Worker<T>,
    ) -> DispatchResult<MutexGuard<'a, WorkerShard<T>>> {
        handle_mutex_poison(worker.shard.lock(), |message| DispatchError::Internal {
            message,
        })
    }
}
