use std::collections::BTreeSet;

/// Aggregate line counts across every file in a pull request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Lines added
    pub additions: u64,
    /// Lines deleted
    pub deletions: u64,
    /// Total changed lines
    pub changes: u64,
}

/// Labels to apply to a pull request. Ordered so request payloads and logs
/// are stable from run to run.
pub type LabelSet = BTreeSet<&'static str>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_summary_is_zero() {
        let summary = DiffSummary::default();
        assert_eq!(summary.additions, 0);
        assert_eq!(summary.deletions, 0);
        assert_eq!(summary.changes, 0);
    }

    #[test]
    fn test_label_set_deduplicates() {
        let set: LabelSet = ["yaml", "markdown", "yaml"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next(), Some(&"markdown"));
    }
}
