//! Detail sub-view with an owned, cancellable fetch
//!
//! Opening a detail view always starts a fresh round trip on a spawned
//! task. Closing the view or opening it again aborts that task, and every
//! open/close bumps a generation counter so a response that still lands
//! late is discarded instead of being applied to a view that has moved on.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use crate::utils::errors::Result;

/// What a detail view currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    Closed,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> DetailState<T> {
    pub fn is_open(&self) -> bool {
        !matches!(self, DetailState::Closed)
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    state: DetailState<T>,
}

#[derive(Debug)]
pub struct DetailView<T> {
    slot: Arc<Mutex<Slot<T>>>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> DetailView<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                generation: 0,
                state: DetailState::Closed,
            })),
            task: None,
        }
    }

    /// Open the view and start `fetch` in the background.
    ///
    /// Any fetch still running for a previous open is aborted.
    pub async fn open<F>(&mut self, fetch: F)
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        self.abort_task();

        let generation = {
            let mut slot = self.slot.lock().await;
            slot.generation += 1;
            slot.state = DetailState::Loading;
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        self.task = Some(tokio::spawn(async move {
            let outcome = fetch.await;
            let mut slot = slot.lock().await;
            if slot.generation != generation {
                debug!(generation = generation, current = slot.generation, "Discarding stale detail response");
                return;
            }
            slot.state = match outcome {
                Ok(value) => DetailState::Loaded(value),
                Err(e) => DetailState::Failed(e.to_string()),
            };
        }));
    }

    /// Close the view, dropping whatever it fetched and any fetch in flight
    pub async fn close(&mut self) {
        self.abort_task();
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        slot.state = DetailState::Closed;
    }

    /// Wait for the current fetch, if any, to settle
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "Detail fetch task failed");
                }
            }
        }
    }

    pub async fn is_open(&self) -> bool {
        self.slot.lock().await.state.is_open()
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T: Clone + Send + 'static> DetailView<T> {
    /// Snapshot of what the view shows right now
    pub async fn state(&self) -> DetailState<T> {
        self.slot.lock().await.state.clone()
    }
}

impl<T: Send + 'static> Default for DetailView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DetailView<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
