use std::sync::{Mutex, MutexGuard};
use tokio::runtime::Runtime;

/// Creates a lightweight single-threaded Tokio runtime.
///
/// Uses the current_thread scheduler: each background worker gets its own
/// runtime, and the default multi-threaded scheduler would spawn a worker
/// thread per core for every one of them.
pub fn create_runtime() -> Result<Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create runtime: {}", e))
}

/// Locks a mutex, recovering from poisoning.
///
/// The data behind these locks is playback bookkeeping (position, finished
/// flag); stale values are acceptable after a panic, a dead lock is not.
pub fn safe_lock<'a, T>(mutex: &'a Mutex<T>, context: &str) -> Option<MutexGuard<'a, T>> {
    match mutex.lock() {
        Ok(guard) => Some(guard),
        Err(poisoned) => {
            log::warn!("[{}] Mutex poisoned, recovering from panic", context);
            Some(poisoned.into_inner())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_lock_recovers_from_poison() {
        let mutex = std::sync::Arc::new(Mutex::new(5u32));
        let clone = std::sync::Arc::clone(&mutex);
        let _ = std::thread::spawn(move || {
            let _guard = clone.lock().unwrap();
            panic!("poison it");
        })
        .join();

        let guard = safe_lock(&mutex, "Test");
        assert_eq!(*guard.unwrap(), 5);
    }
}
