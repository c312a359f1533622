// Completion sink - detached tasks for remote completions
//
// Event handlers never await. Each completion is parked here as its own
// task; a rejection is logged with its context and counted, nothing more.

use crate::client::Completion;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tracing::{error, warn};

/// Owner of every in-flight remote completion.
///
/// Completions are spawned on the ambient tokio runtime. Outside of one
/// they are dropped, logged and counted as failures.
#[derive(Default)]
pub struct CompletionSink {
    tasks: JoinSet<()>,
    failures: Arc<AtomicUsize>,
}

impl CompletionSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detach a completion; a rejection is logged under `context`
    pub fn watch(&mut self, completion: Completion, context: &'static str) {
        self.watch_then(completion, context, || {});
    }

    /// Detach a completion and run `after` once it has resolved successfully
    pub fn watch_then<F>(&mut self, completion: Completion, context: &'static str, after: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            self.failures.fetch_add(1, Ordering::SeqCst);
            error!("{}: no tokio runtime to drive the call", context);
            return;
        };

        let failures = Arc::clone(&self.failures);
        let task = async move {
            match completion.await {
                Ok(()) => after(),
                Err(err) => {
                    failures.fetch_add(1, Ordering::SeqCst);
                    error!(error = %err, "{}", context);
                }
            }
        };
        self.tasks.spawn_on(task, &runtime);
        self.reap();
    }

    /// Number of completions that rejected so far
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    /// Number of completions still tracked (finished ones are reaped lazily)
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every tracked completion
    pub async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                warn!("completion task did not finish: {}", e);
            }
        }
    }

    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                warn!("completion task did not finish: {}", e);
            }
        }
    }
}
