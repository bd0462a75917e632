//! Multi-Port Priority Dispatch Component
//!
//! The egress scheduling primitive of a software packet-switching pipeline:
//! producers enqueue items tagged with a port and a priority level, and a
//! fixed pool of consumer workers dequeues them, each worker serving its own
//! statically-assigned subset of ports.
//!
//! # Overview
//!
//! - **Bounded queues**: every (port, priority) queue has its own capacity;
//!   a full queue rejects the enqueue immediately instead of blocking
//! - **Round-robin fairness**: each worker rotates among its ports with a
//!   cursor persisted across dequeue calls
//! - **Strict rotatable priority**: within a port, queues are served in a
//!   strict order starting at a configurable highest-priority offset
//! - **Per-worker locking**: one mutex and one condvar per worker, so
//!   traffic for different workers never contends
//! - **Blocking consumers only**: `dequeue` blocks while its worker is
//!   empty; `enqueue` always returns immediately
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ enqueue(port, pri) │                    │
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Dispatcher (fixed workers)             │
//! │  ┌─────────── worker 0 ──────────┐ ┌── worker 1 ──┐    │
//! │  │ port 3: [pri0][pri1]          │ │ port 4: ...  │    │
//! │  │ port 5: [pri0][pri1]          │ │ port 8: ...  │    │
//! │  │   ▲ round-robin cursor        │ │              │    │
//! │  └───┼───────────────────────────┘ └──────┬───────┘    │
//! └──────┼────────────────────────────────────┼────────────┘
//!        │ dequeue(0)                         │ dequeue(1)
//! ┌──────┴───────┐                     ┌──────┴───────┐
//! │  Worker      │                     │  Worker      │
//! │  thread 0    │                     │  thread 1    │
//! └──────────────┘                     └──────────────┘
//! ```
//!
//! Worker threads themselves are the embedding application's responsibility;
//! the dispatcher only exposes the blocking pop protocol.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use switchq::dispatch::Dispatcher;
//! use std::sync::Arc;
//! use std::thread;
//!
//! # fn main() -> switchq::dispatch::DispatchResult<()> {
//! // Two workers; even ports go to worker 0, odd ports to worker 1
//! let dispatcher = Arc::new(Dispatcher::new(2, 128, |port| port % 2)?);
//!
//! // One dedicated consumer thread per worker
//! for worker_id in 0..dispatcher.worker_count() {
//!     let dispatcher = Arc::clone(&dispatcher);
//!     thread::spawn(move || loop {
//!         match dispatcher.dequeue(worker_id) {
//!             Ok(delivered) => println!(
//!                 "worker {} got item from port {} priority {}",
//!                 worker_id, delivered.port, delivered.priority
//!             ),
//!             Err(e) => {
//!                 eprintln!("worker {} stopped: {}", worker_id, e);
//!                 break;
//!             }
//!         }
//!     });
//! }
//!
//! // Producers tag items with a port and a priority level
//! if !dispatcher.enqueue(5, 1, vec![0u8; 64])? {
//!     // queue full: backpressure, caller decides whether to retry or drop
//! }
//! # Ok(())
//! # }
//! ```

mod dispatcher;
mod error;
mod port;
mod types;
mod worker;

pub mod api;

pub use dispatcher::{Dispatcher, DEFAULT_PRIORITY_LEVELS};
pub use error::{DispatchError, DispatchResult};
pub use types::{Dequeued, PortId, PortStats, PriorityId, WorkerId};

#[cfg(test)]
mod tests;
