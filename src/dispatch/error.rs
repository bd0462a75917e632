//! Dispatcher Error Types

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid dispatcher configuration: {message}")]
    Configuration { message: String },

    #[error("Worker id {worker_id} out of range (worker count: {worker_count})")]
    WorkerOutOfRange {
        worker_id: usize,
        worker_count: usize,
    },

    #[error("Priority {priority} out of range (priority levels: {levels})")]
    PriorityOutOfRange { priority: usize, levels: usize },

    #[error("Operation failed: {message}")]
    Internal { message: String },
}

/// Result type for dispatcher operations
pub type DispatchResult<T> = Result<T, DispatchError>;
