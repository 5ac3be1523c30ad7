//! # Task System Core Trait
//!
//! A [`Task`] is a self-contained unit of work that runs on its own background
//! thread and hands a value back to the thread that spawned it.
//!
//! ## Task Lifecycle
//! 1. A `Task` is created on the main thread, owning everything it needs
//! 2. [`TaskHandle::spawn`](super::TaskHandle::spawn) moves it onto a new thread
//! 3. `process()` runs to completion; there is no cancellation
//! 4. The handle's ready flag flips once the output exists
//! 5. The main thread polls the flag and joins the handle to take the output
//!
//! ## Thread Safety
//! - `Task` must be `Send + 'static` to be moved onto the worker thread
//! - `Output` must be `Send` to travel back through the join
//! - Shared state must be synchronized, e.g. through [`MtResource`](crate::core::MtResource)

/// A unit of work that can be executed on a background thread.
///
/// Tasks should own their data. Anything borrowed from the main thread must be
/// captured as a snapshot before the task is spawned.
pub trait Task: Send + 'static {
    /// The value produced by the task.
    type Output: Send + 'static;

    /// Processes the task and returns its output.
    ///
    /// Runs on the worker thread. Must not touch render resources.
    fn process(&self) -> Self::Output;
}
