pub mod types;

pub use types::{DiffSummary, LabelSet};

use crate::pr::ChangedFile;

/// Extension to label mapping. Matching is exact and case-sensitive.
const LABEL_TABLE: &[(&str, &str)] = &[
    ("md", "markdown"),
    ("js", "javascript"),
    ("yml", "yaml"),
    ("yaml", "yaml"),
];

/// Fold the changed files into running totals starting from zero.
pub fn summarize(files: &[ChangedFile]) -> DiffSummary {
    files.iter().fold(DiffSummary::default(), |acc, file| DiffSummary {
        additions: acc.additions + file.additions,
        deletions: acc.deletions + file.deletions,
        changes: acc.changes + file.changes,
    })
}

/// Collect the labels triggered by any file in the batch.
///
/// Each file contributes at most one label; files whose extension is missing
/// or not in the table contribute nothing.
pub fn derive_labels(files: &[ChangedFile]) -> LabelSet {
    files
        .iter()
        .filter_map(|file| extension(&file.filename))
        .filter_map(label_for)
        .collect()
}

/// The substring after the last `.` of the final path component, if any.
pub fn extension(filename: &str) -> Option<&str> {
    let name = filename.rsplit('/').next().unwrap_or(filename);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Look up the label for a single extension.
pub fn label_for(ext: &str) -> Option<&'static str> {
    LABEL_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, label)| *label)
}
