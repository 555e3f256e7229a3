//! Type aliases for shared state.
//!
//! The tracker and simulation driver share a hole collection across
//! threads; these aliases name the locking pattern once instead of
//! spelling `Arc<RwLock<...>>` at every use site.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A thread-safe, reader-writer-locked wrapper for read-heavy sharing.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// Wrap a value for cross-thread sharing.
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}

/// Wrap a value for read-heavy cross-thread sharing.
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}
