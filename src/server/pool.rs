//! Fixed-size pool of connection workers.

use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::config::Limits;
use crate::http::connection::Connection;
use crate::router::Router;
use crate::server::queue::TaskQueue;

pub struct WorkerPool {
    workers: Vec<Worker>,
}

struct Worker {
    id: usize,
    handle: JoinHandle<()>,
}

impl WorkerPool {
    /// Spawns `size` workers (at least one) pulling from `queue`.
    pub fn spawn(size: usize, queue: Arc<TaskQueue<TcpStream>>, router: Arc<Router>, limits: Limits) -> Self {
        let workers = (0..size.max(1))
            .map(|id| {
                let queue = Arc::clone(&queue);
                let router = Arc::clone(&router);
                let limits = limits.clone();
                Worker {
                    id,
                    handle: tokio::spawn(run_worker(id, queue, router, limits)),
                }
            })
            .collect();

        Self { workers }
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Waits for every worker to exit. Workers exit once the queue is closed
    /// and empty, after finishing the session they are serving.
    pub async fn join(self) {
        for worker in self.workers {
            if let Err(e) = worker.handle.await {
                error!(worker = worker.id, error = %e, "Worker task failed");
            }
        }
    }
}

async fn run_worker(id: usize, queue: Arc<TaskQueue<TcpStream>>, router: Arc<Router>, limits: Limits) {
    debug!(worker = id, "Worker started");

    while let Some(stream) = queue.pop().await {
        let peer = stream.peer_addr().ok();
        debug!(worker = id, peer = ?peer, "Serving connection");

        let mut conn = Connection::new(stream, Arc::clone(&router), limits.clone());
        if let Err(e) = conn.run().await {
            debug!(worker = id, peer = ?peer, error = %e, "Connection ended with error");
        }
        // conn dropped here: socket closed
    }

    debug!(worker = id, "Worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn pool_has_at_least_one_worker_and_exits_on_close() {
        let queue = Arc::new(TaskQueue::new());
        let pool = WorkerPool::spawn(0, Arc::clone(&queue), Arc::new(Router::new()), Limits::default());

        assert_eq!(pool.len(), 1);
        assert!(!pool.is_empty());

        queue.close();
        tokio::time::timeout(Duration::from_secs(1), pool.join())
            .await
            .expect("workers did not exit after close");
    }
}
