//! Status transitions and the pipeline (per-status) view.

use std::cmp::Reverse;

use serde::Serialize;

use crate::models::{Record, RecordStatus};

/// Return a copy of `record` moved to `new_status`.
///
/// Transitions are caller-driven and any order is accepted. The outcome is
/// kept as-is; whether it shows is decided by [`compute_badges`](super::compute_badges).
pub fn transition_status(record: &Record, new_status: RecordStatus) -> Record {
    if record.status != new_status {
        log::debug!(
            "Record {} moves {} -> {}",
            record.id,
            record.status,
            new_status
        );
    }
    Record {
        status: new_status,
        ..record.clone()
    }
}

/// Sort records newest first; ties are broken by id so the order is stable.
pub fn sort_by_created(records: &mut [&Record]) {
    records.sort_by_key(|r| (Reverse(r.created_at), r.id.clone()));
}

/// Records bucketed by lifecycle stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Pipeline<'a> {
    pub new: Vec<&'a Record>,
    pub in_progress: Vec<&'a Record>,
    pub scheduled: Vec<&'a Record>,
    pub finished: Vec<&'a Record>,
}

impl<'a> Pipeline<'a> {
    /// Bucket for a status.
    pub fn stage(&self, status: RecordStatus) -> &[&'a Record] {
        match status {
            RecordStatus::New => &self.new,
            RecordStatus::InProgress => &self.in_progress,
            RecordStatus::Scheduled => &self.scheduled,
            RecordStatus::Finished => &self.finished,
        }
    }

    fn stage_mut(&mut self, status: RecordStatus) -> &mut Vec<&'a Record> {
        match status {
            RecordStatus::New => &mut self.new,
            RecordStatus::InProgress => &mut self.in_progress,
            RecordStatus::Scheduled => &mut self.scheduled,
            RecordStatus::Finished => &mut self.finished,
        }
    }

    /// Total number of records across all stages.
    pub fn len(&self) -> usize {
        RecordStatus::ALL.iter().map(|s| self.stage(*s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Group records by status, each stage newest first.
pub fn group_by_status(records: &[Record]) -> Pipeline<'_> {
    let mut pipeline = Pipeline::default();
    for record in records {
        pipeline.stage_mut(record.status).push(record);
    }
    for status in RecordStatus::ALL {
        sort_by_created(pipeline.stage_mut(status));
    }
    pipeline
}
