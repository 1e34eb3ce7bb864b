//! Server lifecycle: acceptor, worker pool and shutdown.
//!
//! ```text
//!   accept loop ──push──► TaskQueue ──pop──► worker 0..N ──► Connection
//! ```
//!
//! `stop()` may be called from any task, any number of times. Only the first
//! call tears down:
//!
//! 1. publish `Stopping` (the acceptor drops the listener and exits)
//! 2. close the queue (idle workers wake up, new connections are refused)
//! 3. join every worker (in-flight and queued sessions run to completion)
//! 4. drain whatever is still queued
//! 5. publish `Stopped` (`start()`/`serve()` return)

pub mod listener;
pub mod pool;
pub mod queue;

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::Mutex;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::router::Router;
use pool::WorkerPool;
use queue::TaskQueue;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Running = 0,
    Stopping = 1,
    Stopped = 2,
}

impl Lifecycle {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Lifecycle::Running,
            1 => Lifecycle::Stopping,
            _ => Lifecycle::Stopped,
        }
    }
}

pub struct Server {
    config: ServerConfig,
    router: Arc<Router>,
    queue: Arc<TaskQueue<TcpStream>>,
    state: Arc<AtomicU8>,
    lifecycle: Arc<watch::Sender<Lifecycle>>,
    pool: Mutex<Option<WorkerPool>>,
}

impl Server {
    /// The router is frozen from here on; routes cannot change while serving.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        let (lifecycle, _) = watch::channel(Lifecycle::Running);
        Self {
            config,
            router: Arc::new(router),
            queue: Arc::new(TaskQueue::new()),
            state: Arc::new(AtomicU8::new(Lifecycle::Running as u8)),
            lifecycle: Arc::new(lifecycle),
            pool: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> Lifecycle {
        Lifecycle::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Binds and serves until `stop()` completes.
    ///
    /// A bind failure is logged and returned; nothing is served.
    pub async fn start(&self) -> anyhow::Result<()> {
        let listener = match self.bind() {
            Ok(listener) => listener,
            Err(e) => {
                error!(addr = %self.config.listen_addr(), error = %format!("{e:#}"), "Failed to start server");
                return Err(e);
            }
        };
        self.serve(listener).await
    }

    pub fn bind(&self) -> anyhow::Result<TcpListener> {
        listener::bind(&self.config)
    }

    /// Serves an already bound listener until `stop()` completes.
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        let addr = listener.local_addr()?;
        let mut lifecycle = self.lifecycle.subscribe();

        {
            // stop() takes the pool under this same lock after flipping the
            // state, so workers are either spawned before it looks or not at all.
            let mut pool = self.pool.lock();
            if self.state() != Lifecycle::Running {
                debug!("Server stopped before serving");
                return Ok(());
            }
            *pool = Some(WorkerPool::spawn(
                self.config.workers,
                Arc::clone(&self.queue),
                Arc::clone(&self.router),
                self.config.limits(),
            ));
        }

        info!(%addr, workers = self.config.workers, routes = self.router.len(), "Server listening");

        listener::run(listener, &self.queue, &mut lifecycle).await;

        // The acceptor exits as soon as Stopping is published; teardown is
        // still running in the shutdown task.
        let _ = lifecycle.wait_for(|state| *state == Lifecycle::Stopped).await;
        Ok(())
    }

    /// Shuts the server down. Returns `true` for the call that did the work,
    /// `false` if shutdown was already started elsewhere.
    pub async fn stop(&self) -> bool {
        if self
            .state
            .compare_exchange(
                Lifecycle::Running as u8,
                Lifecycle::Stopping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            debug!("Shutdown already in progress");
            return false;
        }

        info!("Initiating graceful shutdown");
        self.lifecycle.send_replace(Lifecycle::Stopping);

        self.queue.close();
        let pool = self.pool.lock().take();

        // Runs detached so a caller that stops waiting cannot leave the
        // server parked in Stopping.
        let teardown = tokio::spawn(finish_shutdown(
            pool,
            Arc::clone(&self.queue),
            Arc::clone(&self.state),
            Arc::clone(&self.lifecycle),
        ));
        if let Err(e) = teardown.await {
            error!(error = %e, "Shutdown task failed");
        }
        true
    }
}

async fn finish_shutdown(
    pool: Option<WorkerPool>,
    queue: Arc<TaskQueue<TcpStream>>,
    state: Arc<AtomicU8>,
    lifecycle: Arc<watch::Sender<Lifecycle>>,
) {
    if let Some(pool) = pool {
        pool.join().await;
    }

    let drained = queue.drain();
    if drained > 0 {
        debug!(drained, "Closed unclaimed connections");
    }

    state.store(Lifecycle::Stopped as u8, Ordering::Release);
    lifecycle.send_replace(Lifecycle::Stopped);
    info!("All workers joined, server stopped");
}
