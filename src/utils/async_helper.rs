use std::future::Future;
use std::pin::Pin;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

/// Type alias for boxed async tasks
pub type AsyncTask<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Spawns a background thread that runs an async task and sends the result
/// via a channel. The receiving side is polled from the UI thread each frame;
/// a dropped receiver simply discards the result.
///
/// # Example
/// ```ignore
/// let (tx, rx) = std::sync::mpsc::channel();
/// spawn_and_send(move || Box::pin(async move {
///     api::catalog::search(&query).await
/// }), tx);
/// ```
pub fn spawn_and_send<F, T>(task_factory: F, tx: Sender<T>) -> JoinHandle<()>
where
    F: FnOnce() -> AsyncTask<T> + Send + 'static,
    T: Send + 'static,
{
    std::thread::spawn(move || {
        let rt = match crate::utils::error_handling::create_runtime() {
            Ok(r) => r,
            Err(e) => {
                log::error!("[AsyncHelper] Failed to create runtime: {}", e);
                return;
            }
        };

        let result = rt.block_on(task_factory());
        let _ = tx.send(result);
    })
}
