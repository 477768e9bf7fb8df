//! Per-user cancellable generation task supervision.
//!
//! Latest-wins: a new submission for an owner cancels the in-flight task's
//! token and registers itself immediately; the superseded task drains to
//! cancellation on its own and delivers nothing. Tasks for distinct owners
//! never synchronize with each other; the registry lock guards only map
//! mutation, never the work itself.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, debug_span, Instrument};

use crate::Result;

/// Terminal outcome a work future reports back to the supervisor.
#[derive(Debug, PartialEq, Eq)]
pub enum TaskOutcome<T> {
    /// The task ran to completion and produced a value.
    Completed(T),
    /// The task observed its cancellation token at a checkpoint and aborted
    /// without further side effects.
    Cancelled,
}

/// Receiving side for one submitted task.
pub struct SubmitHandle<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> SubmitHandle<T> {
    /// Wait for the task's terminal result.
    ///
    /// Returns `None` when the task was superseded and delivered nothing.
    pub async fn outcome(self) -> Option<Result<T>> {
        self.rx.await.ok()
    }
}

struct ActiveTask {
    epoch: u64,
    cancel: CancellationToken,
}

/// Owns at most one non-terminal generation task per owner.
#[derive(Default)]
pub struct TaskSupervisor {
    tasks: Arc<Mutex<HashMap<String, ActiveTask>>>,
    epochs: AtomicU64,
}

impl TaskSupervisor {
    /// Create an empty supervisor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of owners with a registered in-flight task.
    pub async fn active_count(&self) -> usize {
        self.tasks.lock().await.len()
    }

    /// Register and spawn a generation task for `owner`.
    ///
    /// An existing task for the same owner gets its token cancelled; the new
    /// task starts immediately without waiting for the old one's teardown.
    /// The work future must poll its token at every expensive step and
    /// resolve to [`TaskOutcome::Cancelled`] on a positive poll.
    pub async fn submit<F, Fut, T>(&self, owner: &str, work: F) -> SubmitHandle<T>
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<TaskOutcome<T>>> + Send + 'static,
        T: Send + 'static,
    {
        let epoch = self.epochs.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();

        {
            let mut tasks = self.tasks.lock().await;
            let entry = ActiveTask {
                epoch,
                cancel: cancel.clone(),
            };
            if let Some(previous) = tasks.insert(owner.to_owned(), entry) {
                debug!(owner, "superseding in-flight generation task");
                previous.cancel.cancel();
            }
        }

        let (tx, rx) = oneshot::channel();
        let registry = Arc::clone(&self.tasks);
        let owner_key = owner.to_owned();
        let span = debug_span!("generation_task", owner = %owner_key, epoch);

        tokio::spawn(
            async move {
                let result = work(cancel).await;

                // Deregister, unless a newer task already took the slot.
                let mut tasks = registry.lock().await;
                if tasks.get(&owner_key).is_some_and(|task| task.epoch == epoch) {
                    tasks.remove(&owner_key);
                }
                drop(tasks);

                match result {
                    Ok(TaskOutcome::Completed(value)) => {
                        let _ = tx.send(Ok(value));
                    }
                    Ok(TaskOutcome::Cancelled) => {
                        debug!("generation task cancelled; delivering nothing");
                    }
                    Err(err) => {
                        let _ = tx.send(Err(err));
                    }
                }
            }
            .instrument(span),
        );

        SubmitHandle { rx }
    }
}
