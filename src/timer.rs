use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use leptos::prelude::{set_timeout_with_handle, TimeoutHandle};
use leptos::task::spawn_local;

use crate::error::{describe_js, ScheduleError};

/// Work queued to run on the UI thread once a delay has elapsed.
pub type Task = Pin<Box<dyn Future<Output = ()>>>;

/// Delayed execution with a cancellable handle: the one concurrency primitive
/// the editor needs.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay: Duration, task: Task) -> Result<Self::Handle, ScheduleError>;

    /// Cancelling a handle whose task already started is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Browser `setTimeout`, with the task spawned onto the local executor when it fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = TimeoutHandle;

    fn schedule(&self, delay: Duration, task: Task) -> Result<TimeoutHandle, ScheduleError> {
        set_timeout_with_handle(move || spawn_local(task), delay)
            .map_err(|e| ScheduleError(describe_js(&e)))
    }

    fn cancel(&self, handle: TimeoutHandle) {
        handle.clear();
    }
}
