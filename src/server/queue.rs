//! FIFO of accepted connections shared by the acceptor and the workers.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::Notify;

/// Unbounded FIFO of pending connections.
///
/// One mutex guards both the queue and the `closed` flag; `available` is the
/// wake condition. Each push wakes one waiting worker, closing wakes all of
/// them.
pub struct TaskQueue<T = TcpStream> {
    inner: Mutex<Inner<T>>,
    available: Notify,
}

struct Inner<T> {
    tasks: VecDeque<T>,
    closed: bool,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tasks: VecDeque::new(),
                closed: false,
            }),
            available: Notify::new(),
        }
    }

    /// Enqueues a task and wakes one worker.
    ///
    /// Once the queue is closed the task is handed back instead.
    pub fn push(&self, task: T) -> Result<(), T> {
        {
            let mut inner = self.inner.lock();
            if inner.closed {
                return Err(task);
            }
            inner.tasks.push_back(task);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Waits for the next task.
    ///
    /// Queued tasks are still handed out after `close()`; `None` is returned
    /// only once the queue is both closed and empty.
    pub async fn pop(&self) -> Option<T> {
        loop {
            // Register interest before checking, so a close() between the
            // check and the await is not missed.
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut inner = self.inner.lock();
                if let Some(task) = inner.tasks.pop_front() {
                    return Some(task);
                }
                if inner.closed {
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Refuses further pushes and wakes every waiting worker.
    pub fn close(&self) {
        self.inner.lock().closed = true;
        self.available.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Removes and drops every queued task, returning how many there were.
    pub fn drain(&self) -> usize {
        let drained: Vec<T> = self.inner.lock().tasks.drain(..).collect();
        drained.len()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().tasks.is_empty()
    }
}
