//! Public API for the dispatch system
//!
//! This module provides the complete public API for the dispatcher. External
//! modules should import from here rather than directly from internal
//! modules. See the module documentation for usage examples and architecture
//! details.

// Core dispatcher
pub use crate::dispatch::dispatcher::{Dispatcher, DEFAULT_PRIORITY_LEVELS};

// Error handling
pub use crate::dispatch::error::{DispatchError, DispatchResult};

// Identifier aliases, delivery and statistics types
pub use crate::dispatch::types::{Dequeued, PortId, PortStats, PriorityId, WorkerId};
