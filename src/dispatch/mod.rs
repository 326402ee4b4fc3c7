//! Concurrent query dispatch.
//!
//! [`QueryPool`] is a fixed set of workers draining a shared task queue.
//! The graph is shared read-only (callers pass `Arc<NetworkGraph>`);
//! what-if mutation belongs on snapshots, never on the live graph. A task
//! that panics poisons nothing: the panic is caught at the worker boundary
//! and surfaced to the submitter as [`GraphError::Internal`].

use crate::error::GraphError;
use crate::graph::{NetworkGraph, NodeId};
use crate::search::{create_path_finder, PathAlgorithm, PathResult};
use crate::weight::Strategy;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size worker pool for path queries and other graph work.
///
/// # Examples
///
/// ```
/// use netroute::dispatch::QueryPool;
///
/// let pool = QueryPool::new(2);
/// let handle = pool.submit(|| 6 * 7);
/// assert_eq!(handle.wait().unwrap(), 42);
/// ```
pub struct QueryPool {
    sender: Option<mpsc::Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl QueryPool {
    /// Spawns `threads` workers (at least one).
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..threads)
            .map(|worker_id| {
                let receiver = Arc::clone(&receiver);
                thread::Builder::new()
                    .name(format!("query-worker-{worker_id}"))
                    .spawn(move || loop {
                        let job = {
                            let guard = match receiver.lock() {
                                Ok(guard) => guard,
                                Err(_) => return,
                            };
                            guard.recv()
                        };
                        match job {
                            Ok(job) => job(),
                            Err(_) => return, // channel closed: pool dropped
                        }
                    })
                    .expect("failed to spawn query worker")
            })
            .collect();

        Self {
            sender: Some(sender),
            workers,
        }
    }

    /// Number of workers.
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Queues a task and returns a handle to its result.
    ///
    /// A panic inside the task is caught and reported through the handle
    /// as [`GraphError::Internal`].
    pub fn submit<F, T>(&self, task: F) -> QueryHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (result_tx, result_rx) = mpsc::channel();
        let job: Job = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task))
                .map_err(|payload| GraphError::Internal(panic_message(payload.as_ref())));
            // receiver may be gone if the caller dropped the handle
            let _ = result_tx.send(outcome);
        });

        self.sender
            .as_ref()
            .expect("pool sender lives until drop")
            .send(job)
            .expect("workers outlive the sender");

        QueryHandle { receiver: result_rx }
    }
}

impl Drop for QueryPool {
    /// Closes the queue and joins every worker; queued tasks still run.
    fn drop(&mut self) {
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

/// Receiver side of a submitted task.
pub struct QueryHandle<T> {
    receiver: mpsc::Receiver<Result<T, GraphError>>,
}

impl<T> QueryHandle<T> {
    /// Blocks until the task finishes.
    pub fn wait(self) -> Result<T, GraphError> {
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(GraphError::Internal("worker disconnected".to_string())))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("query task panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("query task panicked: {message}")
    } else {
        "query task panicked".to_string()
    }
}

/// Runs one path query per route concurrently, preserving caller order.
///
/// Each worker builds its own finder; the graph is shared read-only.
pub fn run_path_queries(
    graph: Arc<NetworkGraph>,
    routes: &[(NodeId, NodeId)],
    algorithm: PathAlgorithm,
    strategy: Strategy,
    use_weights: bool,
    threads: usize,
) -> Vec<PathResult> {
    let pool = QueryPool::new(threads);
    let label = create_path_finder(algorithm, strategy, use_weights).name();

    let handles: Vec<QueryHandle<PathResult>> = routes
        .iter()
        .map(|&(start, end)| {
            let graph = Arc::clone(&graph);
            pool.submit(move || {
                let finder = create_path_finder(algorithm, strategy, use_weights);
                finder.find_path(&graph, start, end)
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|handle| match handle.wait() {
            Ok(result) => result,
            Err(error) => PathResult::failed(&label, error),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_returns_value() {
        let pool = QueryPool::new(2);
        let handle = pool.submit(|| "done".to_string());
        assert_eq!(handle.wait().unwrap(), "done");
    }

    #[test]
    fn test_many_tasks_all_complete() {
        let pool = QueryPool::new(4);
        let handles: Vec<_> = (0..100).map(|i| pool.submit(move || i * 2)).collect();
        let results: Vec<i32> = handles.into_iter().map(|h| h.wait().unwrap()).collect();
        assert_eq!(results, (0..100).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_panic_surfaces_as_internal_error() {
        let pool = QueryPool::new(1);
        let handle = pool.submit(|| -> i32 { panic!("boom") });
        match handle.wait() {
            Err(GraphError::Internal(message)) => assert!(message.contains("boom")),
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[test]
    fn test_pool_survives_task_panic() {
        let pool = QueryPool::new(1);
        let _ = pool.submit(|| panic!("first")).wait();
        let handle = pool.submit(|| 5);
        assert_eq!(handle.wait().unwrap(), 5);
    }

    #[test]
    fn test_zero_threads_clamps_to_one() {
        let pool = QueryPool::new(0);
        assert_eq!(pool.thread_count(), 1);
        assert_eq!(pool.submit(|| 1).wait().unwrap(), 1);
    }

    #[test]
    fn test_drop_runs_queued_tasks() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = QueryPool::new(1);
            for _ in 0..20 {
                let counter = Arc::clone(&counter);
                pool.submit(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
        }
        assert_eq!(counter.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn test_run_path_queries_preserves_order() {
        let mut g = NetworkGraph::new("g");
        g.add_edge_weighted(0, 1, 1.0);
        g.add_edge_weighted(1, 2, 1.0);
        g.add_edge_weighted(2, 3, 1.0);
        let graph = Arc::new(g);

        let routes = [(0, 3), (0, 99), (1, 3), (2, 2)];
        let results = run_path_queries(
            Arc::clone(&graph),
            &routes,
            PathAlgorithm::Dijkstra,
            Strategy::MinimizeLatency,
            true,
            3,
        );

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].path, vec![0, 1, 2, 3]);
        assert_eq!(results[1].error, Some(GraphError::NodeNotFound(99)));
        assert_eq!(results[2].path, vec![1, 2, 3]);
        assert_eq!(results[3].path, vec![2]);
    }
}
