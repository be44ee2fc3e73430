//! In-memory state of the engine. Every panel owns exactly one append-only
//! record list with a single writer (its own batch task); nothing survives a
//! process restart.

pub(crate) mod catalog;
pub(crate) mod seed;
pub(crate) mod types;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::time::rfc3339_now;
use crate::services::batch::BatchProgress;
use crate::store::types::{
    ActivityEntry, AnalysisRecord, ExamDataset, ExplanationRecord, MappingRecord, QuestionRecord,
};

const ACTIVITY_CAP: usize = 50;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One panel's record list plus its single-flight batch guard.
pub(crate) struct PanelList<R: Clone> {
    records: RwLock<Vec<R>>,
    active_batch: Mutex<Option<String>>,
}

impl<R: Clone> PanelList<R> {
    fn new() -> Self {
        Self { records: RwLock::new(Vec::new()), active_batch: Mutex::new(None) }
    }

    /// Claims the panel for a batch. Returns false while another batch for
    /// this panel is still in flight.
    pub(crate) fn begin_batch(&self, batch_id: &str) -> bool {
        let mut active = lock(&self.active_batch);
        if active.is_some() {
            return false;
        }
        *active = Some(batch_id.to_string());
        true
    }

    pub(crate) fn finish_batch(&self, batch_id: &str) {
        let mut active = lock(&self.active_batch);
        if active.as_deref() == Some(batch_id) {
            *active = None;
        }
    }

    /// Appends a completed batch as one contiguous block, in submission
    /// order. Refuses to merge anything for a batch that does not own the
    /// panel, so a lost or duplicated task can never partially interleave
    /// records.
    pub(crate) fn merge_batch(&self, batch_id: &str, records: Vec<R>) -> anyhow::Result<()> {
        let active = lock(&self.active_batch);
        if active.as_deref() != Some(batch_id) {
            anyhow::bail!("batch {batch_id} does not own this panel");
        }
        write(&self.records).extend(records);
        Ok(())
    }

    pub(crate) fn append(&self, record: R) {
        write(&self.records).push(record);
    }

    pub(crate) fn records(&self) -> Vec<R> {
        read(&self.records).clone()
    }

    pub(crate) fn len(&self) -> usize {
        read(&self.records).len()
    }
}

pub(crate) struct UsageCounters {
    pub(crate) papers_analyzed: AtomicU64,
    pub(crate) questions_generated: AtomicU64,
    pub(crate) explanations_created: AtomicU64,
    pub(crate) syllabus_mappings: AtomicU64,
    pub(crate) exports_completed: AtomicU64,
}

impl UsageCounters {
    fn seeded() -> Self {
        Self {
            papers_analyzed: AtomicU64::new(seed::BASELINE_PAPERS_ANALYZED),
            questions_generated: AtomicU64::new(seed::BASELINE_QUESTIONS_GENERATED),
            explanations_created: AtomicU64::new(seed::BASELINE_EXPLANATIONS_CREATED),
            syllabus_mappings: AtomicU64::new(seed::BASELINE_SYLLABUS_MAPPINGS),
            exports_completed: AtomicU64::new(seed::BASELINE_EXPORTS_COMPLETED),
        }
    }

    pub(crate) fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    pub(crate) fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}

pub(crate) struct Store {
    analyses: PanelList<AnalysisRecord>,
    questions: PanelList<QuestionRecord>,
    explanations: PanelList<ExplanationRecord>,
    mappings: PanelList<MappingRecord>,
    datasets: RwLock<Vec<ExamDataset>>,
    batches: RwLock<HashMap<String, Arc<BatchProgress>>>,
    activity: RwLock<Vec<ActivityEntry>>,
    counters: UsageCounters,
}

impl Store {
    pub(crate) fn new() -> Self {
        Self {
            analyses: PanelList::new(),
            questions: PanelList::new(),
            explanations: PanelList::new(),
            mappings: PanelList::new(),
            datasets: RwLock::new(seed::exam_datasets()),
            batches: RwLock::new(HashMap::new()),
            activity: RwLock::new(seed::recent_activity()),
            counters: UsageCounters::seeded(),
        }
    }

    pub(crate) fn analyses(&self) -> &PanelList<AnalysisRecord> {
        &self.analyses
    }

    pub(crate) fn questions(&self) -> &PanelList<QuestionRecord> {
        &self.questions
    }

    pub(crate) fn explanations(&self) -> &PanelList<ExplanationRecord> {
        &self.explanations
    }

    pub(crate) fn mappings(&self) -> &PanelList<MappingRecord> {
        &self.mappings
    }

    pub(crate) fn counters(&self) -> &UsageCounters {
        &self.counters
    }

    pub(crate) fn register_batch(&self, progress: Arc<BatchProgress>) {
        write(&self.batches).insert(progress.id().to_string(), progress);
    }

    pub(crate) fn batch(&self, batch_id: &str) -> Option<Arc<BatchProgress>> {
        read(&self.batches).get(batch_id).cloned()
    }

    pub(crate) fn push_activity(&self, action: impl Into<String>, details: impl Into<String>) {
        let mut activity = write(&self.activity);
        activity.insert(
            0,
            ActivityEntry { action: action.into(), details: details.into(), at: rfc3339_now() },
        );
        activity.truncate(ACTIVITY_CAP);
    }

    pub(crate) fn recent_activity(&self, limit: usize) -> Vec<ActivityEntry> {
        read(&self.activity).iter().take(limit).cloned().collect()
    }

    pub(crate) fn datasets(&self) -> Vec<ExamDataset> {
        read(&self.datasets).clone()
    }

    pub(crate) fn add_dataset(&self, dataset: ExamDataset) {
        write(&self.datasets).insert(0, dataset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_list_is_single_flight() {
        let list: PanelList<u32> = PanelList::new();
        assert!(list.begin_batch("a"));
        assert!(!list.begin_batch("b"));
        list.finish_batch("a");
        assert!(list.begin_batch("b"));
    }

    #[test]
    fn finish_batch_ignores_other_owners() {
        let list: PanelList<u32> = PanelList::new();
        assert!(list.begin_batch("a"));
        list.finish_batch("b");
        assert!(!list.begin_batch("c"));
    }

    #[test]
    fn merge_appends_contiguously_in_submission_order() {
        let list: PanelList<u32> = PanelList::new();
        assert!(list.begin_batch("a"));
        list.merge_batch("a", vec![1, 2, 3]).expect("merge");
        list.finish_batch("a");

        assert!(list.begin_batch("b"));
        list.merge_batch("b", vec![4, 5]).expect("merge");
        list.finish_batch("b");

        assert_eq!(list.records(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn merge_without_ownership_leaves_list_unmodified() {
        let list: PanelList<u32> = PanelList::new();
        assert!(list.begin_batch("a"));
        assert!(list.merge_batch("rogue", vec![9]).is_err());
        assert!(list.records().is_empty());
    }

    #[test]
    fn activity_feed_is_newest_first_and_capped() {
        let store = Store::new();
        for index in 0..(ACTIVITY_CAP + 10) {
            store.push_activity(format!("event {index}"), "details");
        }
        let recent = store.recent_activity(ACTIVITY_CAP + 10);
        assert_eq!(recent.len(), ACTIVITY_CAP);
        assert_eq!(recent[0].action, format!("event {}", ACTIVITY_CAP + 9));
    }
}
