//! Worker threads for load-time processing.
//!
//! Slider construction is CPU bound and independent per slider, so a beatmap
//! is split into chunks that run as tasks on a small pool of threads.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use async_executor::{Executor, Task};

/// How long an idle worker sleeps before polling the executor again.
const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// A fixed set of threads driving one shared executor.
///
/// # Example
///
/// ```
/// use glissade_beatmap::TaskPool;
///
/// let pool = TaskPool::new(2).unwrap();
/// let task = pool.spawn(async { 6 * 7 });
/// assert_eq!(futures_lite::future::block_on(task), 42);
/// ```
pub struct TaskPool {
    executor: Arc<Executor<'static>>,
    threads: Vec<thread::JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl TaskPool {
    /// Start a pool with `num_threads` workers (at least one).
    pub fn new(num_threads: usize) -> io::Result<Self> {
        let num_threads = num_threads.max(1);
        let executor = Arc::new(Executor::new());
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut threads = Vec::with_capacity(num_threads);

        for i in 0..num_threads {
            let exec = executor.clone();
            let shutdown_flag = shutdown.clone();

            let spawned = thread::Builder::new()
                .name(format!("glissade-worker-{}", i))
                .spawn(move || {
                    while !shutdown_flag.load(Ordering::Relaxed) {
                        if !exec.try_tick() {
                            thread::sleep(IDLE_SLEEP);
                        }
                    }
                });

            match spawned {
                Ok(handle) => threads.push(handle),
                Err(err) => {
                    // Stop the workers that did start before reporting
                    shutdown.store(true, Ordering::Relaxed);
                    for handle in threads {
                        let _ = handle.join();
                    }
                    return Err(err);
                }
            }
        }

        tracing::debug!("TaskPool created with {} threads", num_threads);

        Ok(Self {
            executor,
            threads,
            shutdown,
        })
    }

    /// Start a pool with one worker per available CPU core.
    pub fn with_num_cpus() -> io::Result<Self> {
        Self::new(num_cpus::get())
    }

    /// Start a pool leaving one core to the calling thread.
    pub fn default_threads() -> io::Result<Self> {
        Self::new(num_cpus::get().saturating_sub(1).max(1))
    }

    /// Spawn a task on the pool.
    pub fn spawn<T>(&self, future: impl Future<Output = T> + Send + 'static) -> Task<T>
    where
        T: Send + 'static,
    {
        self.executor.spawn(future)
    }

    /// Spawn every future and block until all of them finish.
    ///
    /// Results come back in the order of `futures`, whatever order the
    /// workers complete them in.
    pub fn run_all<T, F>(&self, futures: impl IntoIterator<Item = F>) -> Vec<T>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        let tasks: Vec<Task<T>> = futures.into_iter().map(|f| self.spawn(f)).collect();
        tasks
            .into_iter()
            .map(futures_lite::future::block_on)
            .collect()
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Stop the workers and wait for them to exit.
    ///
    /// Tasks that are still queued are dropped without running.
    pub fn shutdown(mut self) {
        tracing::debug!("Shutting down TaskPool with {} threads", self.threads.len());

        self.shutdown.store(true, Ordering::Relaxed);

        for handle in std::mem::take(&mut self.threads) {
            if let Err(e) = handle.join() {
                tracing::error!("Task pool thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for TaskPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskPool")
            .field("threads", &self.threads.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_pool_creation() {
        let pool = TaskPool::new(2).unwrap();
        assert_eq!(pool.thread_count(), 2);
    }

    #[test]
    fn test_zero_threads_becomes_one() {
        let pool = TaskPool::new(0).unwrap();
        assert_eq!(pool.thread_count(), 1);
    }

    #[test]
    fn test_spawn_and_await() {
        let pool = TaskPool::new(2).unwrap();

        let task = pool.spawn(async { 42 });

        assert_eq!(pollster::block_on(task), 42);
    }

    #[test]
    fn test_run_all_keeps_order() {
        let pool = TaskPool::new(4).unwrap();

        let results = pool.run_all((0..10).map(|i| async move {
            // Later tasks finish first
            thread::sleep(Duration::from_millis(10 - i));
            i * 2
        }));

        assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn test_default_threads() {
        let pool = TaskPool::default_threads().unwrap();
        assert!(pool.thread_count() >= 1);
        assert!(pool.thread_count() <= num_cpus::get().max(1));
    }

    #[test]
    fn test_shutdown() {
        let pool = TaskPool::new(2).unwrap();
        let task = pool.spawn(async { 1 });
        assert_eq!(pollster::block_on(task), 1);

        pool.shutdown();
    }
}
