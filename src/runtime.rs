//! Task spawning for fire-and-forget work.
//!
//! Widget event handlers are synchronous callbacks, but attribution
//! refreshes are async. `spawn` bridges the two on the ambient tokio
//! runtime.

use std::future::Future;

/// Spawn a fire-and-forget task on the current tokio runtime. Outside a
/// runtime the task is dropped with a warning rather than panicking, so
/// event handlers stay safe to call from any thread.
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(future);
        }
        Err(_) => {
            log::warn!("dropped background task: no async runtime running");
        }
    }
}
