//! # Task Management System
//!
//! Runs [`Task`]s on dedicated background threads with an explicit join point.
//!
//! ## Architecture Overview
//!
//! - [`Task`]: a unit of work that owns its inputs
//! - [`TaskHandle`]: the running task, its ready flag and its join handle
//!
//! Each handle owns exactly one OS thread. A handle is always joined, either
//! through [`TaskHandle::join`] or when it is dropped, so worker threads never
//! outlive the data they were handed.
//!
//! ## Example Usage
//! ```rust
//! use voxel_world::engine_state::task_management::{Task, TaskHandle};
//!
//! struct Sum(Vec<u32>);
//!
//! impl Task for Sum {
//!     type Output = u32;
//!     fn process(&self) -> u32 {
//!         self.0.iter().sum()
//!     }
//! }
//!
//! let handle = TaskHandle::spawn(Sum(vec![1, 2, 3]));
//! assert_eq!(handle.join(), Some(6));
//! ```

pub mod task;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};

pub use task::Task;

/// A task running on its own thread.
///
/// # Fields
/// - `ready`: Set by the worker after `process()` returns
/// - `worker`: The thread's join handle, taken on join
#[derive(Debug)]
pub struct TaskHandle<T: Send + 'static> {
    ready: Arc<AtomicBool>,
    worker: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> TaskHandle<T> {
    /// Starts `task` on a new thread.
    pub fn spawn<K>(task: K) -> Self
    where
        K: Task<Output = T>,
    {
        let ready = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ready);

        let worker = thread::spawn(move || {
            let output = task.process();
            flag.store(true, Ordering::Release);
            output
        });

        TaskHandle {
            ready,
            worker: Some(worker),
        }
    }

    /// True once the task has produced its output. Never blocks.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Waits for the task and returns its output.
    ///
    /// # Returns
    /// - `Some(output)` if the task completed
    /// - `None` if the worker panicked
    pub fn join(mut self) -> Option<T> {
        self.join_worker()
    }

    fn join_worker(&mut self) -> Option<T> {
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(output) => Some(output),
            Err(_) => {
                log::error!("Background task panicked");
                None
            }
        }
    }
}

impl<T: Send + 'static> Drop for TaskHandle<T> {
    fn drop(&mut self) {
        self.join_worker();
    }
}
