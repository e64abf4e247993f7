use crate::pr::PrTarget;
use crate::summary::{DiffSummary, LabelSet};

/// Everything a completed run computed and (unless dry-run) posted.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The pull request that was processed
    pub target: PrTarget,
    /// Number of changed files returned by the host
    pub files_changed: usize,
    /// Totals across all changed files
    pub summary: DiffSummary,
    /// Labels derived from the file extensions
    pub labels: LabelSet,
    /// Rendered summary comment
    pub comment: String,
    /// True when the label and comment writes were skipped
    pub dry_run: bool,
}
