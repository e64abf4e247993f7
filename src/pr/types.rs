use serde::Deserialize;

/// One file touched by a pull request, as returned by the list-files endpoint.
/// Only the fields the summarizer needs are kept; the rest of the GitHub
/// payload (sha, status, patch, ...) is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    /// Path of the file relative to the repository root
    pub filename: String,
    /// Lines added in this file
    pub additions: u64,
    /// Lines deleted in this file
    pub deletions: u64,
    /// Total changed lines as reported by the host
    pub changes: u64,
}

impl ChangedFile {
    #[cfg(test)]
    pub fn new(filename: &str, additions: u64, deletions: u64) -> Self {
        Self {
            filename: filename.to_string(),
            additions,
            deletions,
            changes: additions + deletions,
        }
    }
}

/// Identifies a single pull request within a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrTarget {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
}

impl std::fmt::Display for PrTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.pr_number)
    }
}
