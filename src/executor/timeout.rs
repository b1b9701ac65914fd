//! Wall-clock budget for one unit of detection work.
//!
//! The task runs on a worker thread and reports back over a channel. When
//! the budget expires the cancellation flag is raised and the worker is
//! detached; it observes the flag at its next poll and exits without a
//! result. A worker that dies without reporting (a panic) is surfaced as an
//! error so the run does not silently lose a file.

use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Result of a budgeted task.
#[derive(Debug)]
pub enum Outcome<T> {
    Finished(T),
    TimedOut,
}

/// Run `task` with a wall-clock budget. The task must poll the flag it is
/// given and return `None` once the flag is raised. `what` names the work
/// for error messages.
pub fn run_with_budget<T, F>(
    task: F,
    budget: Duration,
    what: &str,
) -> Result<Outcome<T>, Box<dyn Error>>
where
    F: FnOnce(&AtomicBool) -> Option<T> + Send + 'static,
    T: Send + 'static,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let worker_cancel = Arc::clone(&cancel);
    let (sender, receiver) = mpsc::channel();

    thread::Builder::new()
        .name("clone-detection".into())
        .spawn(move || {
            let result = task(&worker_cancel);
            // The receiver is gone after a timeout; nothing left to do.
            let _ = sender.send(result);
        })?;

    match receiver.recv_timeout(budget) {
        Ok(Some(value)) => Ok(Outcome::Finished(value)),
        Ok(None) => Ok(Outcome::TimedOut),
        Err(RecvTimeoutError::Timeout) => {
            cancel.store(true, Ordering::Relaxed);
            Ok(Outcome::TimedOut)
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(format!("detection worker for {what} terminated unexpectedly").into())
        }
    }
}

#[cfg(test)]
#[path = "timeout_test.rs"]
mod tests;
