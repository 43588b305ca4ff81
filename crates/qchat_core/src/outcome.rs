use std::path::PathBuf;

use crate::RequestId;

/// Terminal result of refreshing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A positive page count was already recorded; no remote call was made.
    Skipped,
    /// The endpoint reported a positive count and it was stored.
    Updated { indexed_pages: i64 },
    /// The endpoint answered without a positive count.
    NoProgress { reported: Option<i64> },
    /// Transport, parse or store failure. The record is left as it was.
    Failed { reason: String },
}

impl RefreshOutcome {
    pub fn is_unchanged(&self) -> bool {
        !matches!(self, RefreshOutcome::Updated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub request_id: RequestId,
    pub outcome: RefreshOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Produced { filename: String, path: PathBuf },
    /// Nothing was written.
    Aborted { reason: String },
}
