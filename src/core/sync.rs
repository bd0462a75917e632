//! Synchronization utilities for robust mutex handling
//!
//! The dispatcher guards every worker shard with a `std::sync::Mutex`, and a
//! panic on any thread holding such a lock poisons it. This module converts
//! poison errors into application-specific errors so callers see a normal
//! `Err` instead of a panic.

use std::sync::LockResult;

/// Handle poisoned lock results with consistent error handling
///
/// Converts a mutex poison error into an application-specific error using the
/// provided error constructor. The function is generic over the lock result
/// payload, so it applies both to `Mutex::lock` and to the guard handed back
/// by `Condvar::wait`, which can equally report poisoning on reacquisition.
///
/// # Arguments
/// * `result` - The result from a lock or condvar-wait operation
/// * `error_constructor` - Function to create the appropriate error type
///
/// # Returns
/// The guard on success, or an application error on poison
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use switchq::core::sync::handle_mutex_poison;
/// use switchq::dispatch::DispatchError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(
///     mutex.lock(),
///     |message| DispatchError::Internal { message }
/// ).unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). This indicates a panic occurred while holding a lock. PoisonError: {:?}",
            poison_err
        ))
    })
}
