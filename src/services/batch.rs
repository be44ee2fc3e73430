//! The batch-processing workflow shared by the analyzer and generator
//! panels: N independent work items fanned out concurrently against the
//! generation backend, each failure degraded to a deterministic fallback,
//! results collected in submission order, progress tied to actually
//! settled items.

use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use serde::Serialize;

use crate::store::types::{BatchState, ItemStatus};

/// Live progress of one batch. `settled` counts work items that have
/// resolved (success or fallback), so the reported percentage is
/// monotonically non-decreasing and reaches 100 only once every item has
/// actually finished.
pub(crate) struct BatchProgress {
    id: String,
    panel: &'static str,
    total: u32,
    settled: AtomicU32,
    state: Mutex<BatchState>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct BatchSnapshot {
    pub(crate) id: String,
    pub(crate) panel: &'static str,
    pub(crate) state: BatchState,
    pub(crate) total_items: u32,
    pub(crate) settled_items: u32,
    pub(crate) percent: u8,
}

impl BatchProgress {
    pub(crate) fn new(id: String, panel: &'static str, total: u32) -> Arc<Self> {
        Arc::new(Self {
            id,
            panel,
            total,
            settled: AtomicU32::new(0),
            state: Mutex::new(BatchState::Running),
        })
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn panel(&self) -> &'static str {
        self.panel
    }

    fn mark_settled(&self) {
        self.settled.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn settled(&self) -> u32 {
        self.settled.load(Ordering::SeqCst).min(self.total)
    }

    pub(crate) fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.settled() as u64 * 100) / self.total as u64) as u8
    }

    pub(crate) fn state(&self) -> BatchState {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn finish(&self, state: BatchState) {
        let mut current = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if *current == BatchState::Running {
            *current = state;
        }
    }

    pub(crate) fn snapshot(&self) -> BatchSnapshot {
        BatchSnapshot {
            id: self.id.clone(),
            panel: self.panel,
            state: self.state(),
            total_items: self.total,
            settled_items: self.settled(),
            percent: self.percent(),
        }
    }
}

/// Outcome of a single work item. A failed item still carries a full
/// fallback payload so the merged list never holds a hole.
#[derive(Debug, Clone)]
pub(crate) enum ItemOutcome<T> {
    Completed(T),
    Fallback { value: T, reason: String },
}

impl<T> ItemOutcome<T> {
    pub(crate) fn status(&self) -> ItemStatus {
        match self {
            Self::Completed(_) => ItemStatus::Completed,
            Self::Fallback { .. } => ItemStatus::Failed,
        }
    }

    pub(crate) fn into_parts(self) -> (T, ItemStatus, Option<String>) {
        match self {
            Self::Completed(value) => (value, ItemStatus::Completed, None),
            Self::Fallback { value, reason } => (value, ItemStatus::Failed, Some(reason)),
        }
    }
}

/// Issues one `op` future per work-item index, all concurrently, and
/// returns the outcomes in submission order. A per-item error is logged and
/// replaced by `fallback`; it never aborts the batch and is never retried.
/// Both closures index into the caller's own input collection.
pub(crate) async fn process_items<T, Op, Fut, Fb>(
    total: usize,
    progress: &BatchProgress,
    op: Op,
    fallback: Fb,
) -> Vec<ItemOutcome<T>>
where
    Op: Fn(usize) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    Fb: Fn(usize) -> T,
{
    let fallback = &fallback;

    let item_futures = (0..total).map(|index| {
        let work = op(index);
        async move {
            let outcome = match work.await {
                Ok(value) => {
                    metrics::counter!(
                        "batch_items_total",
                        "panel" => progress.panel(),
                        "status" => "completed"
                    )
                    .increment(1);
                    ItemOutcome::Completed(value)
                }
                Err(err) => {
                    tracing::warn!(
                        batch_id = %progress.id(),
                        panel = progress.panel(),
                        item = index,
                        error = %format!("{err:#}"),
                        "Work item failed; substituting fallback record"
                    );
                    metrics::counter!(
                        "batch_items_total",
                        "panel" => progress.panel(),
                        "status" => "fallback"
                    )
                    .increment(1);
                    ItemOutcome::Fallback { value: fallback(index), reason: format!("{err:#}") }
                }
            };
            progress.mark_settled();
            outcome
        }
    });

    join_all(item_futures).await
}
